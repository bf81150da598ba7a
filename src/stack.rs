//! A depth-indexed builder for the nested lists of the record being assembled.

use crate::value::NestedValue;

/// The partially built chain of nested lists for one record.
///
/// `open[0]` is the record-level list and `open[i]` the list at depth `i + 1`.
/// Every open list is implicitly the last element of the list one level up.
/// Lists which are no longer open have been sealed into their parent and can
/// not receive more elements.
///
/// Depths passed to the push methods are repetition levels: they say how far
/// to back out of the current nesting relative to the previous push, not how
/// deep the new value is.
#[derive(Debug, Clone, PartialEq)]
pub struct ReconstructionStack<T> {
    max_depth: usize,
    open: Vec<Vec<NestedValue<T>>>,
}

impl<T> ReconstructionStack<T> {
    /// Creates a skeleton of `max_depth` nested empty lists, all of them open.
    ///
    /// A stack always holds the record-level list, so a depth below 1 is
    /// treated as 1.
    pub fn new(max_depth: usize) -> Self {
        let max_depth = max_depth.max(1);
        Self {
            max_depth,
            open: (0..max_depth).map(|_| Vec::new()).collect(),
        }
    }

    /// Creates a stack in which only the record-level list is open.
    pub fn empty(max_depth: usize) -> Self {
        Self {
            max_depth: max_depth.max(1),
            open: vec![Vec::new()],
        }
    }

    /// Depth of the innermost open list.
    pub fn depth(&self) -> usize {
        self.open.len()
    }

    pub fn max_depth(&self) -> usize {
        self.max_depth
    }

    /// Places `value` at leaf depth as a new element of the list at `at_depth`.
    ///
    /// If `at_depth` is the innermost open list, and that is the leaf depth,
    /// `value` becomes its next sibling. If `at_depth` is shallower, every
    /// list deeper than `at_depth` is sealed and a fresh chain of lists down
    /// to the leaf depth is opened around `value`. A depth at or beyond the
    /// innermost open list extends the open chain down to the leaf depth.
    pub fn push(&mut self, value: NestedValue<T>, at_depth: usize) -> &mut Self {
        self.insert(at_depth, self.max_depth, Some(value))
    }

    /// Places a null element into the list at `depth`, opening a new element
    /// of the list at `at_depth`.
    pub fn push_null(&mut self, at_depth: usize, depth: usize) -> &mut Self {
        self.insert(at_depth, depth, Some(NestedValue::Null))
    }

    /// Opens the list at `depth` without placing anything into it, so the list
    /// stays empty unless a later push continues it.
    pub fn push_empty_list(&mut self, at_depth: usize, depth: usize) -> &mut Self {
        self.insert(at_depth, depth, None)
    }

    fn insert(
        &mut self,
        at_depth: usize,
        container_depth: usize,
        value: Option<NestedValue<T>>,
    ) -> &mut Self {
        let container_depth = container_depth.clamp(1, self.max_depth);

        // The record-level list is never sealed.
        self.seal_below(at_depth.min(container_depth).max(1));

        while self.open.len() < container_depth {
            self.open.push(Vec::new());
        }

        if let (Some(value), Some(innermost)) = (value, self.open.last_mut()) {
            innermost.push(value);
        }

        self
    }

    /// Seals every open list deeper than `depth` into its parent.
    fn seal_below(&mut self, depth: usize) {
        while self.open.len() > depth {
            if let Some(items) = self.open.pop() {
                if let Some(parent) = self.open.last_mut() {
                    parent.push(NestedValue::List(items));
                }
            }
        }
    }

    /// Returns a snapshot of the record built so far.
    pub fn value(&self) -> NestedValue<T>
    where
        T: Clone,
    {
        self.clone().into_value()
    }

    /// Seals every open list and returns the record.
    pub fn into_value(mut self) -> NestedValue<T> {
        self.seal_below(1);
        NestedValue::List(self.open.pop().unwrap_or_default())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::nested;

    fn leaf(value: i64) -> NestedValue<i64> {
        NestedValue::Leaf(value)
    }

    #[test]
    fn test_skeleton() {
        assert_eq!(ReconstructionStack::<i64>::new(3).value(), nested!([[[]]]));
        assert_eq!(ReconstructionStack::<i64>::new(1).value(), nested!([]));
        assert_eq!(ReconstructionStack::<i64>::new(0).value(), nested!([]));
        assert_eq!(ReconstructionStack::<i64>::empty(3).value(), nested!([]));
    }

    #[test]
    fn test_push_value_to_specific_level() {
        let mut stack = ReconstructionStack::new(3);
        stack.push(leaf(1), 3);

        assert_eq!(stack.value(), nested!([[[1]]]));
    }

    #[test]
    fn test_push_value_to_lower_level() {
        let mut stack = ReconstructionStack::new(3);
        stack.push(leaf(1), 3).push(leaf(2), 2);

        assert_eq!(stack.value(), nested!([[[1], [2]]]));
    }

    #[test]
    fn test_push_value_to_highest_level() {
        let mut stack = ReconstructionStack::new(3);
        stack.push(leaf(1), 3).push(leaf(2), 2).push(leaf(3), 3);

        assert_eq!(stack.value(), nested!([[[1], [2, 3]]]));
    }

    #[test]
    fn test_push_value_highest_level_then_lower_and_higher() {
        let mut stack = ReconstructionStack::new(3);
        stack.push(leaf(1), 3).push(leaf(2), 2).push(leaf(3), 2);

        assert_eq!(stack.value(), nested!([[[1], [2], [3]]]));
    }

    #[test]
    fn test_push_to_level_3_then_2_then_1_then_each_level() {
        let mut stack = ReconstructionStack::new(3);
        stack.push(leaf(1), 3).push(leaf(2), 2).push(leaf(3), 1);
        assert_eq!(stack.value(), nested!([[[1], [2]], [[3]]]));

        let mut again = stack.clone();
        again.push(leaf(4), 1);
        assert_eq!(again.value(), nested!([[[1], [2]], [[3]], [[4]]]));

        let mut second = stack.clone();
        second.push(leaf(4), 2);
        assert_eq!(second.value(), nested!([[[1], [2]], [[3], [4]]]));

        let mut third = stack;
        third.push(leaf(4), 3);
        assert_eq!(third.value(), nested!([[[1], [2]], [[3, 4]]]));
    }

    #[test]
    fn test_push_by_2_levels() {
        let mut stack = ReconstructionStack::new(4);
        stack
            .push(leaf(1), 4)
            .push(leaf(2), 2)
            .push(leaf(3), 1)
            .push(leaf(4), 2)
            .push(leaf(5), 4);

        assert_eq!(
            stack.into_value(),
            nested!([[[[1]], [[2]]], [[[3]], [[4, 5]]]])
        );
    }

    #[test]
    fn test_empty_stack_opens_chain_on_first_push() {
        let mut stack = ReconstructionStack::empty(2);
        assert_eq!(stack.depth(), 1);

        stack.push(leaf(1), 0);
        assert_eq!(stack.depth(), 2);
        assert_eq!(stack.value(), nested!([[1]]));
    }

    #[test]
    fn test_null_and_empty_lists_terminate_early() {
        let mut stack = ReconstructionStack::empty(2);
        stack
            .push_null(0, 1)
            .push_empty_list(1, 2)
            .push(leaf(7), 1)
            .push_null(2, 2)
            .push_empty_list(1, 2);

        assert_eq!(stack.depth(), 2);
        assert_eq!(stack.into_value(), nested!([null, [], [7, null], []]));
    }

    #[test]
    fn test_empty_record() {
        let mut stack = ReconstructionStack::<i64>::empty(1);
        stack.push_empty_list(0, 1);

        assert_eq!(stack.into_value(), nested!([]));
    }
}
