//! Record rendering for compressed hierarchy output.

use std::io::{self, Write};

use crate::contig::SummaryEdge;

/// Renders `edges` to `writer` as `ancestor,descendant,tag;` records.
///
/// Records are concatenated with no separator beyond the trailing `;`, and
/// no final newline is appended. The writer is not flushed here; the caller
/// flushes once after the full stream is rendered.
///
/// # Errors
/// Returns [`io::Error`] if writing to the supplied writer fails.
///
/// # Examples
/// ```
/// # use std::error::Error;
/// # use trellis_core::{render_records, EdgeKind, NodeId, SummaryEdge};
/// # fn main() -> Result<(), Box<dyn Error>> {
/// let edges = vec![
///     SummaryEdge::new(NodeId::new(7), NodeId::new(5), EdgeKind::ClusterToCluster),
///     SummaryEdge::new(NodeId::new(5), NodeId::new(1), EdgeKind::ClusterToMember),
/// ];
/// let mut buffer = Vec::new();
/// render_records(&edges, &mut buffer)?;
/// assert_eq!(String::from_utf8(buffer)?, "7,5,c-c;5,1,c-m;");
/// # Ok(())
/// # }
/// ```
pub fn render_records(edges: &[SummaryEdge], mut writer: impl Write) -> io::Result<()> {
    for edge in edges {
        write!(
            writer,
            "{},{},{};",
            edge.ancestor(),
            edge.descendant(),
            edge.kind().tag()
        )?;
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::contig::EdgeKind;
    use crate::partition::NodeId;

    #[test]
    fn renders_nothing_for_an_empty_edge_list() {
        let mut buffer = Vec::new();
        render_records(&[], &mut buffer).expect("writing to a vec cannot fail");
        assert!(buffer.is_empty());
    }

    #[test]
    fn renders_records_without_trailing_newline() {
        let edges = vec![SummaryEdge::new(
            NodeId::new(10),
            NodeId::new(3),
            EdgeKind::ClusterToMember,
        )];
        let mut buffer = Vec::new();
        render_records(&edges, &mut buffer).expect("writing to a vec cannot fail");
        assert_eq!(buffer, b"10,3,c-m;");
    }
}
