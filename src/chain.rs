//! Singly linked collision chains stored in a generational arena.
//!
//! Each bucket holds the key of its chain head; each `Entry` holds the key of
//! its successor. A node is reachable from exactly one bucket and is removed
//! from the arena when it is unlinked.

use slotmap::SlotMap;

slotmap::new_key_type! {
    /// Arena key of a chain node.
    pub(crate) struct NodeKey;
}

#[derive(Debug)]
pub(crate) struct Entry<V> {
    pub(crate) key: String,
    pub(crate) value: V,
    pub(crate) next: Option<NodeKey>,
}

pub(crate) type Nodes<V> = SlotMap<NodeKey, Entry<V>>;

/// Walks the chain starting at `head` and returns the node holding `key`.
pub(crate) fn find<V>(nodes: &Nodes<V>, head: Option<NodeKey>, key: &str) -> Option<NodeKey> {
    let mut cur = head;
    while let Some(k) = cur {
        let e = &nodes[k];
        if e.key == key {
            return Some(k);
        }
        cur = e.next;
    }
    None
}

/// Overwrites the value of `key` if the chain holds it, otherwise appends a
/// new node at the tail. Returns the replaced value; `None` means a node was
/// added.
pub(crate) fn upsert<V>(
    nodes: &mut Nodes<V>,
    head: &mut Option<NodeKey>,
    key: String,
    value: V,
) -> Option<V> {
    let Some(mut cur) = *head else {
        *head = Some(nodes.insert(Entry {
            key,
            value,
            next: None,
        }));
        return None;
    };

    loop {
        let e = &mut nodes[cur];
        if e.key == key {
            return Some(core::mem::replace(&mut e.value, value));
        }
        match e.next {
            Some(next) => cur = next,
            None => break,
        }
    }

    log::trace!("appending {:?} after {:?}", key, nodes[cur].key);
    let tail = nodes.insert(Entry {
        key,
        value,
        next: None,
    });
    nodes[cur].next = Some(tail);
    None
}

/// Splices the node holding `key` out of its chain and frees it.
pub(crate) fn unlink<V>(
    nodes: &mut Nodes<V>,
    head: &mut Option<NodeKey>,
    key: &str,
) -> Option<Entry<V>> {
    let mut prev: Option<NodeKey> = None;
    let mut cur = *head;
    while let Some(k) = cur {
        let next = nodes[k].next;
        if nodes[k].key == key {
            match prev {
                None => *head = next,
                Some(p) => nodes[p].next = next,
            }
            return nodes.remove(k);
        }
        prev = Some(k);
        cur = next;
    }
    None
}

/// Consumes a whole chain head to tail, freeing each node as it is yielded.
pub(crate) struct Drain<'a, V> {
    nodes: &'a mut Nodes<V>,
    cur: Option<NodeKey>,
}

pub(crate) fn drain<V>(nodes: &mut Nodes<V>, head: Option<NodeKey>) -> Drain<'_, V> {
    Drain { nodes, cur: head }
}

impl<V> Iterator for Drain<'_, V> {
    type Item = (String, V);

    fn next(&mut self) -> Option<Self::Item> {
        let k = self.cur?;
        let e = self.nodes.remove(k)?;
        self.cur = e.next;
        Some((e.key, e.value))
    }
}
