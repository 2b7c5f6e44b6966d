use blume_core::errors::StoreError;

/// Store operations that can be targeted by an injected failure.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum StoreOp {
    Headers,
    GetAllRecords,
    AppendRow,
    FindRow,
    DeleteRow,
    UpdateCell,
}

impl StoreOp {
    pub const ALL: [StoreOp; 6] = [
        StoreOp::Headers,
        StoreOp::GetAllRecords,
        StoreOp::AppendRow,
        StoreOp::FindRow,
        StoreOp::DeleteRow,
        StoreOp::UpdateCell,
    ];

    pub fn is_write(&self) -> bool {
        matches!(
            self,
            StoreOp::AppendRow | StoreOp::DeleteRow | StoreOp::UpdateCell
        )
    }
}

/// A queued failure. Consumed by the first matching call.
#[derive(Debug, Clone)]
pub(crate) struct InjectedFailure {
    pub op: StoreOp,
    pub table: Option<String>,
    pub error: StoreError,
    /// Write the change, then report the error anyway.
    pub after_apply: bool,
}

impl InjectedFailure {
    pub fn matches(&self, op: StoreOp, table: &str) -> bool {
        self.op == op && self.table.as_deref().map_or(true, |t| t == table)
    }
}

/// Take the first queued failure for this call, if any.
pub(crate) fn take_failure(
    queue: &mut Vec<InjectedFailure>,
    op: StoreOp,
    table: &str,
) -> Option<InjectedFailure> {
    let position = queue.iter().position(|f| f.matches(op, table))?;
    Some(queue.remove(position))
}

#[cfg(test)]
mod tests {
    use super::*;

    fn failure(op: StoreOp, table: Option<&str>) -> InjectedFailure {
        InjectedFailure {
            op,
            table: table.map(str::to_string),
            error: StoreError::unavailable("boom"),
            after_apply: false,
        }
    }

    #[test]
    fn take_failure_respects_table_filter_and_order() {
        let mut queue = vec![
            failure(StoreOp::DeleteRow, Some("Pending Archive")),
            failure(StoreOp::DeleteRow, None),
            failure(StoreOp::AppendRow, None),
        ];

        let taken = take_failure(&mut queue, StoreOp::DeleteRow, "Active Faults");
        assert!(taken.is_some_and(|f| f.table.is_none()));
        assert_eq!(queue.len(), 2);

        let taken = take_failure(&mut queue, StoreOp::DeleteRow, "Pending Archive");
        assert!(taken.is_some_and(|f| f.table.as_deref() == Some("Pending Archive")));
        assert!(take_failure(&mut queue, StoreOp::DeleteRow, "Pending Archive").is_none());
    }

    #[test]
    fn only_mutations_count_as_writes() {
        let writes: Vec<_> = StoreOp::ALL.iter().filter(|op| op.is_write()).collect();
        assert_eq!(
            writes,
            vec![&StoreOp::AppendRow, &StoreOp::DeleteRow, &StoreOp::UpdateCell]
        );
    }
}
