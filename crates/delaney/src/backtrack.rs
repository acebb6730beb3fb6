//! Lazy depth-first enumeration over an implicit search tree.
//!
//! A problem supplies the root, the children of a node and an optional result per node.
//! [`Traversal`] walks the tree in pre-order and keeps its position as an explicit stack
//! of sibling lists, so it can stop after any result and pick up again later. Exhausted
//! levels are dropped as soon as their last sibling is taken, so the stack holds only
//! levels that still have work.

/// A backtracking problem: an implicit tree of states with results attached to nodes.
pub trait Backtrack {
    type State: Clone;
    type Output;

    fn root(&self) -> Self::State;

    /// Children in visiting order.
    fn children(&self, state: &Self::State) -> Vec<Self::State>;

    fn extract(&self, state: &Self::State) -> Option<Self::Output>;
}

/// Resumable pre-order cursor over a [`Backtrack`] problem.
///
/// `Clone` deep-copies the position; a clone and its original advance independently.
pub struct Traversal<'a, P: Backtrack + ?Sized> {
    problem: &'a P,
    /// Unvisited siblings per depth, stored reversed so the next one is at the end.
    stack: Vec<Vec<P::State>>,
}

impl<'a, P: Backtrack + ?Sized> Traversal<'a, P> {
    pub fn new(problem: &'a P) -> Self {
        Self {
            problem,
            stack: vec![vec![problem.root()]],
        }
    }

    /// Next result in pre-order, or `None` once the tree is exhausted.
    pub fn advance(&mut self) -> Option<P::Output> {
        while let Some(siblings) = self.stack.last_mut() {
            let Some(state) = siblings.pop() else {
                self.stack.pop();
                continue;
            };
            if siblings.is_empty() {
                self.stack.pop();
            }
            let mut children = self.problem.children(&state);
            if !children.is_empty() {
                children.reverse();
                self.stack.push(children);
            }
            if let Some(out) = self.problem.extract(&state) {
                return Some(out);
            }
        }
        None
    }

    /// Number of levels currently on the position stack.
    pub fn depth(&self) -> usize {
        self.stack.len()
    }

    pub fn is_exhausted(&self) -> bool {
        self.stack.iter().all(Vec::is_empty)
    }
}

impl<P: Backtrack + ?Sized> Clone for Traversal<'_, P> {
    fn clone(&self) -> Self {
        Self {
            problem: self.problem,
            stack: self.stack.clone(),
        }
    }
}

impl<P: Backtrack + ?Sized> Iterator for Traversal<'_, P> {
    type Item = P::Output;

    fn next(&mut self) -> Option<Self::Item> {
        self.advance()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    /// Binary strings up to a fixed length; each node yields its own string.
    struct Words {
        max_len: usize,
    }

    impl Backtrack for Words {
        type State = String;
        type Output = String;

        fn root(&self) -> String {
            String::new()
        }

        fn children(&self, s: &String) -> Vec<String> {
            if s.len() < self.max_len {
                vec![format!("{s}0"), format!("{s}1")]
            } else {
                Vec::new()
            }
        }

        fn extract(&self, s: &String) -> Option<String> {
            Some(s.clone())
        }
    }

    /// Only leaves yield, as in the branching search.
    struct Leaves(usize);

    impl Backtrack for Leaves {
        type State = Vec<u8>;
        type Output = Vec<u8>;

        fn root(&self) -> Vec<u8> {
            Vec::new()
        }

        fn children(&self, s: &Vec<u8>) -> Vec<Vec<u8>> {
            if s.len() == self.0 {
                return Vec::new();
            }
            (0..3)
                .map(|k| {
                    let mut t = s.clone();
                    t.push(k);
                    t
                })
                .collect()
        }

        fn extract(&self, s: &Vec<u8>) -> Option<Vec<u8>> {
            (s.len() == self.0).then(|| s.clone())
        }
    }

    /// Unbounded tree: a chain of naturals.
    struct Naturals;

    impl Backtrack for Naturals {
        type State = u64;
        type Output = u64;

        fn root(&self) -> u64 {
            0
        }

        fn children(&self, n: &u64) -> Vec<u64> {
            vec![n + 1]
        }

        fn extract(&self, n: &u64) -> Option<u64> {
            (n % 2 == 0).then_some(*n)
        }
    }

    #[test]
    fn pre_order_yields_parent_before_children() {
        let p = Words { max_len: 2 };
        let got: Vec<String> = Traversal::new(&p).collect();
        assert_eq!(got, vec!["", "0", "00", "01", "1", "10", "11"]);
    }

    #[test]
    fn leaves_in_lexicographic_order() {
        let p = Leaves(2);
        let got: Vec<Vec<u8>> = Traversal::new(&p).collect();
        assert_eq!(got.len(), 9);
        assert_eq!(got[0], vec![0, 0]);
        assert_eq!(got[8], vec![2, 2]);
        assert!(got.windows(2).all(|w| w[0] < w[1]));
    }

    #[test]
    fn infinite_tree_is_lazy() {
        let got: Vec<u64> = Traversal::new(&Naturals).take(4).collect();
        assert_eq!(got, vec![0, 2, 4, 6]);
    }

    #[test]
    fn single_child_chain_keeps_constant_depth() {
        let mut t = Traversal::new(&Naturals);
        for _ in 0..100 {
            t.advance();
            assert_eq!(t.depth(), 1);
        }
    }

    #[test]
    fn clone_resumes_independently() {
        let p = Words { max_len: 3 };
        let all: Vec<String> = Traversal::new(&p).collect();
        let mut t = Traversal::new(&p);
        for _ in 0..5 {
            t.advance();
        }
        let snapshot = t.clone();
        let rest: Vec<String> = t.collect();
        let rest_again: Vec<String> = snapshot.collect();
        assert_eq!(rest, rest_again);
        assert_eq!(rest, all[5..].to_vec());
    }

    #[test]
    fn exhausted_cursor_stays_exhausted() {
        let p = Leaves(1);
        let mut t = Traversal::new(&p);
        assert_eq!(t.by_ref().count(), 3);
        assert!(t.is_exhausted());
        assert_eq!(t.advance(), None);
        assert_eq!(t.depth(), 0);
    }

    #[test]
    fn position_stack_stays_shallow() {
        let p = Leaves(4);
        let mut t = Traversal::new(&p);
        while t.advance().is_some() {
            assert!(t.depth() <= 5);
        }
    }
}
