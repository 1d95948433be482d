//! Assembly of compiled graphs into `-filter_complex` form.

use ffgraph_core::{compile, Stream};

use crate::Result;

/// A compiled graph in the shape ffmpeg's CLI consumes: the
/// `-filter_complex` description plus one bracketed `-map` label per
/// terminal. This is a formatting convenience only; invoking ffmpeg remains
/// the caller's concern.
#[derive(Debug, Clone, PartialEq)]
pub struct FilterComplex {
    /// Value for the `-filter_complex` argument.
    pub description: String,
    /// Bracketed output pad labels, one per terminal, in request order.
    pub maps: Vec<String>,
}

impl FilterComplex {
    /// Compile `terminals` and bracket their labels.
    pub fn assemble(terminals: &[Stream]) -> Result<Self> {
        let compiled = compile(terminals)?;
        let maps = compiled
            .terminal_labels
            .iter()
            .map(|label| format!("[{label}]"))
            .collect();
        Ok(Self {
            description: compiled.graph,
            maps,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::input;
    use crate::Scale;

    #[test]
    fn assemble_brackets_terminal_labels() {
        let out = input(0)
            .video()
            .scale(Scale::new().w("1280").h("720"))
            .unwrap();
        let fc = FilterComplex::assemble(&[out.into_stream()]).unwrap();
        assert_eq!(fc.description, "[0:v]scale=w=1280:h=720[s0]");
        assert_eq!(fc.maps, vec!["[s0]"]);
    }
}
