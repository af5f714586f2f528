use crate::arena::{Handle, TypedArena};
use crate::splay_tree::node::Node;
use std::borrow::Borrow;
use std::cmp::Ordering;

pub type Arena<T> = TypedArena<Node<T>>;

fn rotate_left<T>(arena: &mut Arena<T>, node: Handle) -> Handle {
    let child = match arena[node].right {
        Some(child) => child,
        None => return node,
    };
    let grandchild = arena[child].left;
    arena[node].right = grandchild;
    arena[child].left = Some(node);
    child
}

fn rotate_right<T>(arena: &mut Arena<T>, node: Handle) -> Handle {
    let child = match arena[node].left {
        Some(child) => child,
        None => return node,
    };
    let grandchild = arena[child].right;
    arena[node].left = grandchild;
    arena[child].right = Some(node);
    child
}

// Top-down splay. `cmp` orders the target relative to a key in the tree. Nodes passed on the way
// down are linked into a tree of smaller keys and a tree of larger keys, which become the children
// of the node the descent stops at.
fn splay_by<T, F>(arena: &mut Arena<T>, mut root: Handle, mut cmp: F) -> Handle
where
    F: FnMut(&T) -> Ordering,
{
    let mut left_root = None;
    let mut left_max: Option<Handle> = None;
    let mut right_root = None;
    let mut right_min: Option<Handle> = None;

    loop {
        match cmp(&arena[root].key) {
            Ordering::Less => {
                let child = match arena[root].left {
                    Some(child) => child,
                    None => break,
                };
                if cmp(&arena[child].key) == Ordering::Less {
                    root = rotate_right(arena, root);
                }

                let next = match arena[root].left.take() {
                    Some(next) => next,
                    None => break,
                };
                match right_min {
                    Some(min) => arena[min].left = Some(root),
                    None => right_root = Some(root),
                }
                right_min = Some(root);
                root = next;
            },
            Ordering::Greater => {
                let child = match arena[root].right {
                    Some(child) => child,
                    None => break,
                };
                if cmp(&arena[child].key) == Ordering::Greater {
                    root = rotate_left(arena, root);
                }

                let next = match arena[root].right.take() {
                    Some(next) => next,
                    None => break,
                };
                match left_max {
                    Some(max) => arena[max].right = Some(root),
                    None => left_root = Some(root),
                }
                left_max = Some(root);
                root = next;
            },
            Ordering::Equal => break,
        }
    }

    let left = arena[root].left;
    let right = arena[root].right;
    match left_max {
        Some(max) => arena[max].right = left,
        None => left_root = left,
    }
    match right_min {
        Some(min) => arena[min].left = right,
        None => right_root = right,
    }
    arena[root].left = left_root;
    arena[root].right = right_root;
    root
}

/// Splays the node closest to `key` to the root of the subtree rooted at `root` and returns it.
pub fn splay<T, V>(arena: &mut Arena<T>, root: Handle, key: &V) -> Handle
where
    T: Borrow<V>,
    V: Ord + ?Sized,
{
    splay_by(arena, root, |other| key.cmp(other.borrow()))
}

pub fn insert<T>(arena: &mut Arena<T>, tree: &mut Option<Handle>, key: T) -> bool
where
    T: Ord,
{
    if find(arena, tree, &key).is_some() {
        return false;
    }
    splice(arena, tree, key);
    true
}

/// Links a new node holding `key` above the root. `tree` must already be splayed on `key` and
/// must not contain it.
pub fn splice<T>(arena: &mut Arena<T>, tree: &mut Option<Handle>, key: T)
where
    T: Ord,
{
    let new_node = match *tree {
        Some(root) if key < arena[root].key => {
            let left = arena[root].left.take();
            Node {
                key,
                left,
                right: Some(root),
            }
        },
        Some(root) => {
            let right = arena[root].right.take();
            Node {
                key,
                left: Some(root),
                right,
            }
        },
        None => Node::new(key),
    };
    *tree = Some(arena.allocate(new_node));
}

pub fn remove<T, V>(arena: &mut Arena<T>, tree: &mut Option<Handle>, key: &V) -> Option<T>
where
    T: Borrow<V>,
    V: Ord + ?Sized,
{
    let root = find(arena, tree, key)?;
    let Node { key: removed, left, right } = arena.free(root);
    *tree = match left {
        Some(left) => {
            let new_root = splay(arena, left, key);
            arena[new_root].right = right;
            Some(new_root)
        },
        None => right,
    };
    Some(removed)
}

/// Splays `key` towards the root and returns the root if it matches `key`.
pub fn find<T, V>(arena: &mut Arena<T>, tree: &mut Option<Handle>, key: &V) -> Option<Handle>
where
    T: Borrow<V>,
    V: Ord + ?Sized,
{
    let root = splay(arena, (*tree)?, key);
    *tree = Some(root);
    if key.cmp(arena[root].key.borrow()) == Ordering::Equal {
        Some(root)
    } else {
        None
    }
}

pub fn min<T>(arena: &mut Arena<T>, tree: &mut Option<Handle>) -> Option<Handle> {
    let root = splay_by(arena, (*tree)?, |_| Ordering::Less);
    *tree = Some(root);
    Some(root)
}

pub fn max<T>(arena: &mut Arena<T>, tree: &mut Option<Handle>) -> Option<Handle> {
    let root = splay_by(arena, (*tree)?, |_| Ordering::Greater);
    *tree = Some(root);
    Some(root)
}

pub fn floor<'a, T, V>(arena: &'a Arena<T>, tree: Option<Handle>, key: &V) -> Option<&'a T>
where
    T: Borrow<V>,
    V: Ord + ?Sized,
{
    let mut curr = tree;
    let mut ret = None;
    while let Some(handle) = curr {
        let node = &arena[handle];
        match key.cmp(node.key.borrow()) {
            Ordering::Less => curr = node.left,
            Ordering::Greater => {
                ret = Some(&node.key);
                curr = node.right;
            },
            Ordering::Equal => return Some(&node.key),
        }
    }
    ret
}

pub fn ceil<'a, T, V>(arena: &'a Arena<T>, tree: Option<Handle>, key: &V) -> Option<&'a T>
where
    T: Borrow<V>,
    V: Ord + ?Sized,
{
    let mut curr = tree;
    let mut ret = None;
    while let Some(handle) = curr {
        let node = &arena[handle];
        match key.cmp(node.key.borrow()) {
            Ordering::Greater => curr = node.right,
            Ordering::Less => {
                ret = Some(&node.key);
                curr = node.left;
            },
            Ordering::Equal => return Some(&node.key),
        }
    }
    ret
}

/// Copies the subtree rooted at `tree` from `source` into `dest` node by node and returns the
/// root of the copy. The copy has the same shape as the original.
pub fn copy<T>(source: &Arena<T>, tree: Option<Handle>, dest: &mut Arena<T>) -> Option<Handle>
where
    T: Clone,
{
    let root = tree?;
    let new_root = dest.allocate(Node::new(source[root].key.clone()));
    let mut stack = vec![(root, new_root)];

    while let Some((node, new_node)) = stack.pop() {
        let (left, right) = (source[node].left, source[node].right);
        if let Some(left) = left {
            let new_left = dest.allocate(Node::new(source[left].key.clone()));
            dest[new_node].left = Some(new_left);
            stack.push((left, new_left));
        }
        if let Some(right) = right {
            let new_right = dest.allocate(Node::new(source[right].key.clone()));
            dest[new_node].right = Some(new_right);
            stack.push((right, new_right));
        }
    }

    Some(new_root)
}

#[cfg(test)]
mod tests {
    use super::{ceil, copy, find, floor, insert, max, min, remove, Arena};
    use crate::arena::Handle;

    type Shape = Vec<(u32, Option<u32>, Option<u32>)>;

    fn build(keys: &[u32]) -> (Arena<u32>, Option<Handle>) {
        let mut arena = Arena::new();
        let mut tree = None;
        for key in keys {
            insert(&mut arena, &mut tree, *key);
        }
        (arena, tree)
    }

    // Pre-order listing of every node with the keys of its children.
    fn shape(arena: &Arena<u32>, tree: Option<Handle>) -> Shape {
        let mut ret = Vec::new();
        let mut stack: Vec<Handle> = tree.into_iter().collect();
        while let Some(handle) = stack.pop() {
            let node = &arena[handle];
            ret.push((
                node.key,
                node.left.map(|left| arena[left].key),
                node.right.map(|right| arena[right].key),
            ));
            stack.extend(node.right);
            stack.extend(node.left);
        }
        ret
    }

    #[test]
    fn test_insert_increasing_builds_left_chain() {
        let (arena, tree) = build(&[1, 2, 3, 4, 5]);
        assert_eq!(
            shape(&arena, tree),
            vec![
                (5, Some(4), None),
                (4, Some(3), None),
                (3, Some(2), None),
                (2, Some(1), None),
                (1, None, None),
            ],
        );
    }

    #[test]
    fn test_splay_halves_chain() {
        let (mut arena, mut tree) = build(&[1, 2, 3, 4, 5]);
        assert!(find(&mut arena, &mut tree, &1).is_some());
        assert_eq!(
            shape(&arena, tree),
            vec![
                (1, None, Some(4)),
                (4, Some(2), Some(5)),
                (2, None, Some(3)),
                (3, None, None),
                (5, None, None),
            ],
        );
    }

    #[test]
    fn test_min_matches_splay_of_smallest_key() {
        let (mut arena, mut tree) = build(&[1, 2, 3, 4, 5]);
        let root = min(&mut arena, &mut tree);
        assert_eq!(root, tree);
        assert_eq!(
            shape(&arena, tree),
            vec![
                (1, None, Some(4)),
                (4, Some(2), Some(5)),
                (2, None, Some(3)),
                (3, None, None),
                (5, None, None),
            ],
        );
    }

    #[test]
    fn test_find_absent_stops_at_neighbour() {
        let (mut arena, mut tree) = build(&[10, 20, 30, 40, 50]);
        assert_eq!(find(&mut arena, &mut tree, &25), None);
        assert_eq!(
            shape(&arena, tree),
            vec![
                (20, Some(10), Some(40)),
                (10, None, None),
                (40, Some(30), Some(50)),
                (30, None, None),
                (50, None, None),
            ],
        );
    }

    #[test]
    fn test_insert_and_max_shapes() {
        let (mut arena, mut tree) = build(&[50, 40, 60, 30]);
        assert_eq!(
            shape(&arena, tree),
            vec![
                (30, None, Some(40)),
                (40, None, Some(50)),
                (50, None, Some(60)),
                (60, None, None),
            ],
        );

        let root = max(&mut arena, &mut tree).unwrap();
        assert_eq!(arena[root].key, 60);
        assert_eq!(
            shape(&arena, tree),
            vec![
                (60, Some(40), None),
                (40, Some(30), Some(50)),
                (30, None, None),
                (50, None, None),
            ],
        );

        assert_eq!(remove(&mut arena, &mut tree, &60), Some(60));
        assert_eq!(
            shape(&arena, tree),
            vec![
                (50, Some(40), None),
                (40, Some(30), None),
                (30, None, None),
            ],
        );
        assert_eq!(arena.len(), 3);
    }

    #[test]
    fn test_insert_duplicate() {
        let (mut arena, mut tree) = build(&[1, 2, 3]);
        assert!(!insert(&mut arena, &mut tree, 2));
        assert_eq!(arena.len(), 3);
        assert_eq!(arena[tree.unwrap()].key, 2);
    }

    #[test]
    fn test_insert_twice_keeps_shape() {
        let (mut arena, mut tree) = build(&[10, 30, 50, 20, 40]);
        assert!(insert(&mut arena, &mut tree, 25));
        let before = shape(&arena, tree);

        assert!(!insert(&mut arena, &mut tree, 25));
        assert_eq!(shape(&arena, tree), before);
        assert_eq!(arena.len(), 6);
    }

    #[test]
    fn test_remove_without_left_child() {
        let (mut arena, mut tree) = build(&[1, 2]);
        assert_eq!(remove(&mut arena, &mut tree, &1), Some(1));
        assert_eq!(shape(&arena, tree), vec![(2, None, None)]);
    }

    #[test]
    fn test_remove_absent() {
        let (mut arena, mut tree) = build(&[1, 3]);
        assert_eq!(remove(&mut arena, &mut tree, &2), None);
        assert_eq!(arena.len(), 2);
    }

    #[test]
    fn test_remove_last() {
        let (mut arena, mut tree) = build(&[1]);
        assert_eq!(remove(&mut arena, &mut tree, &1), Some(1));
        assert_eq!(tree, None);
        assert!(arena.is_empty());
    }

    #[test]
    fn test_empty() {
        let mut arena: Arena<u32> = Arena::new();
        let mut tree = None;
        assert_eq!(find(&mut arena, &mut tree, &1), None);
        assert_eq!(remove(&mut arena, &mut tree, &1), None);
        assert_eq!(min(&mut arena, &mut tree), None);
        assert_eq!(max(&mut arena, &mut tree), None);
        assert_eq!(floor(&arena, tree, &1), None);
        assert_eq!(ceil(&arena, tree, &1), None);
    }

    #[test]
    fn test_floor_ceil() {
        let (arena, tree) = build(&[1, 3, 5]);

        assert_eq!(floor(&arena, tree, &0), None);
        assert_eq!(floor(&arena, tree, &2), Some(&1));
        assert_eq!(floor(&arena, tree, &3), Some(&3));
        assert_eq!(floor(&arena, tree, &6), Some(&5));

        assert_eq!(ceil(&arena, tree, &0), Some(&1));
        assert_eq!(ceil(&arena, tree, &3), Some(&3));
        assert_eq!(ceil(&arena, tree, &4), Some(&5));
        assert_eq!(ceil(&arena, tree, &6), None);
    }

    #[test]
    fn test_copy_preserves_shape() {
        let (mut arena, mut tree) = build(&[10, 20, 30, 40, 50]);
        find(&mut arena, &mut tree, &25);

        let mut dest = Arena::new();
        let copied = copy(&arena, tree, &mut dest);
        assert_eq!(shape(&dest, copied), shape(&arena, tree));
        assert_eq!(dest.len(), arena.len());
    }
}
