use std::fmt;

/// Kind of remote card collection a trigger watches.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum TargetKind {
    List,
    Board,
}

impl TargetKind {
    fn path_segment(self) -> &'static str {
        match self {
            TargetKind::List => "lists",
            TargetKind::Board => "boards",
        }
    }
}

/// One collection to query during a poll.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct QueryTarget {
    pub kind: TargetKind,
    pub id: String,
}

impl QueryTarget {
    pub fn list(id: impl Into<String>) -> Self {
        Self {
            kind: TargetKind::List,
            id: id.into(),
        }
    }

    pub fn board(id: impl Into<String>) -> Self {
        Self {
            kind: TargetKind::Board,
            id: id.into(),
        }
    }

    /// API endpoint relative to `{base}/{version}/`.
    pub fn cards_endpoint(&self) -> String {
        format!("{}/{}/cards", self.kind.path_segment(), self.id)
    }
}

impl fmt::Display for QueryTarget {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self.kind {
            TargetKind::List => write!(f, "list '{}'", self.id),
            TargetKind::Board => write!(f, "board '{}'", self.id),
        }
    }
}

/// Resolve configured sources into query targets.
///
/// Order: board, then the single list, then each element of `list_ids`.
/// Duplicates are kept; a list named twice is fetched twice.
pub fn resolve_targets(
    board_id: Option<&str>,
    list_id: Option<&str>,
    list_ids: &[String],
) -> Vec<QueryTarget> {
    let mut targets = Vec::with_capacity(2 + list_ids.len());
    if let Some(board_id) = board_id {
        targets.push(QueryTarget::board(board_id));
    }
    if let Some(list_id) = list_id {
        targets.push(QueryTarget::list(list_id));
    }
    targets.extend(list_ids.iter().map(QueryTarget::list));
    targets
}
