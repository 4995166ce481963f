//! Helpers shared by everything that emits Wolfram-language text.

use crate::index::Index;

/// Wrap an expression in the `Block`/`ExpandIndices` envelope used for every
/// Lagrangian term, declaring the given index names as block locals.
pub fn wolfram_block<I, S>(indices: I, expr: &str, repl: &str) -> String
where
    I: IntoIterator<Item = S>,
    S: AsRef<str>,
{
    let locals: Vec<String> = indices
        .into_iter()
        .map(|s| s.as_ref().to_owned())
        .collect();
    let lines = [
        "Block[".to_owned(),
        format!("  {{{}}}", locals.join(",")),
        "  ,".to_owned(),
        "  ExpandIndices[".to_owned(),
        format!("    {expr}"),
        "    , FlavorExpand -> {SU2W, SU2D, Generation}".to_owned(),
        "  ]".to_owned(),
        format!("]{repl};"),
    ];
    lines.join("\n")
}

/// The FeynRules `Index[...]` declaration for one index occurrence.
pub fn wolfram_index_entry(index: &Index) -> String {
    format!("Index[{}]", index.kind().wolfram_rep())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn index_entries() {
        let entries: Vec<String> = Index::parse_list("i0 I11 -c9 g")
            .unwrap()
            .iter()
            .map(wolfram_index_entry)
            .collect();
        assert_eq!(
            entries,
            [
                "Index[SU2D]",
                "Index[SU2W]",
                "Index[Colour]",
                "Index[Generation]"
            ]
        );
    }

    #[test]
    fn block_layout() {
        let block = wolfram_block(["i0", "i1"], "H[i0] anti[H][i1]", "/.gotoBFM");
        assert_eq!(
            block,
            "Block[\n  {i0,i1}\n  ,\n  ExpandIndices[\n    H[i0] anti[H][i1]\n    , FlavorExpand -> {SU2W, SU2D, Generation}\n  ]\n]/.gotoBFM;"
        );
    }
}
