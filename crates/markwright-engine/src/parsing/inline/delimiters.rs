use super::arena::{Arena, NodeId, NodeValue};

/// A run of `*` or `_` that may open or close emphasis.
#[derive(Debug, Clone)]
pub struct Delimiter {
    /// Text node holding the run's remaining characters.
    pub node: NodeId,
    pub ch: u8,
    /// Characters not yet used by a match.
    pub length: usize,
    /// Run length as scanned; used by the rule of three.
    pub original: usize,
    pub can_open: bool,
    pub can_close: bool,
    /// Cleared when the entry is removed from the stack.
    pub active: bool,
    pub prev: Option<usize>,
    pub next: Option<usize>,
}

/// Delimiter entries for one leaf block, in document order.
///
/// Entries are never moved: removal clears `active` and splices the entry
/// out of the `prev`/`next` chain, so indices stay valid as stack bottoms.
#[derive(Debug, Default)]
pub struct DelimiterStack {
    entries: Vec<Delimiter>,
    top: Option<usize>,
}

/// Slot in the openers-bottom table for a closer: character, whether it
/// can also open, and its original length modulo 3.
fn bottom_slot(d: &Delimiter) -> usize {
    let ch = if d.ch == b'_' { 0 } else { 6 };
    let can_open = if d.can_open { 3 } else { 0 };
    ch + can_open + d.original % 3
}

/// Both runs can match unless one of them could go either way and the
/// lengths add up to a multiple of three without both being multiples.
fn lengths_compatible(opener: &Delimiter, closer: &Delimiter) -> bool {
    let either_way = opener.can_close || closer.can_open;
    !either_way
        || (opener.original + closer.original) % 3 != 0
        || (opener.original % 3 == 0 && closer.original % 3 == 0)
}

impl DelimiterStack {
    /// Number of entries ever pushed; a stack bottom for later processing.
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.top.is_none()
    }

    pub fn push(&mut self, node: NodeId, ch: u8, length: usize, can_open: bool, can_close: bool) {
        let index = self.entries.len();
        self.entries.push(Delimiter {
            node,
            ch,
            length,
            original: length,
            can_open,
            can_close,
            active: true,
            prev: self.top,
            next: None,
        });
        if let Some(top) = self.top {
            self.entries[top].next = Some(index);
        }
        self.top = Some(index);
    }

    fn remove(&mut self, index: usize) {
        let entry = &mut self.entries[index];
        if !entry.active {
            return;
        }
        entry.active = false;
        let (prev, next) = (entry.prev, entry.next);
        if let Some(prev) = prev {
            self.entries[prev].next = next;
        }
        match next {
            Some(next) => self.entries[next].prev = prev,
            None => self.top = prev,
        }
    }

    /// Lowest live entry at or above `bottom`, found by walking down from
    /// the top so that removed entries are never visited.
    fn first_active_from(&self, bottom: usize) -> Option<usize> {
        let mut first = None;
        let mut cursor = self.top;
        while let Some(i) = cursor
            && i >= bottom
        {
            first = Some(i);
            cursor = self.entries[i].prev;
        }
        first
    }

    /// Resolves emphasis among the entries at or above `bottom`, then removes
    /// them all from the stack.
    pub fn process_emphasis(&mut self, arena: &mut Arena, bottom: usize) {
        let mut openers_bottom = [bottom; 12];
        let mut closer = self.first_active_from(bottom);

        while let Some(c) = closer {
            if !self.entries[c].can_close {
                closer = self.entries[c].next;
                continue;
            }
            let slot = bottom_slot(&self.entries[c]);
            let mut candidate = self.entries[c].prev;
            let mut opener = None;
            while let Some(o) = candidate {
                if o < openers_bottom[slot] {
                    break;
                }
                let (od, cd) = (&self.entries[o], &self.entries[c]);
                if od.ch == cd.ch && od.can_open && lengths_compatible(od, cd) {
                    opener = Some(o);
                    break;
                }
                candidate = od.prev;
            }

            match opener {
                Some(o) => closer = self.match_pair(arena, o, c),
                None => {
                    // Nothing below this closer can ever match one like it.
                    openers_bottom[slot] = c;
                    let next = self.entries[c].next;
                    if !self.entries[c].can_open {
                        self.remove(c);
                    }
                    closer = next;
                }
            }
        }

        while let Some(top) = self.top
            && top >= bottom
        {
            self.remove(top);
        }
    }

    /// Wraps everything between opener `o` and closer `c` in emphasis and
    /// returns the closer to continue with.
    fn match_pair(&mut self, arena: &mut Arena, o: usize, c: usize) -> Option<usize> {
        let used = if self.entries[o].length >= 2 && self.entries[c].length >= 2 {
            2
        } else {
            1
        };
        self.entries[o].length -= used;
        self.entries[c].length -= used;
        let (opener_node, closer_node) = (self.entries[o].node, self.entries[c].node);
        for node in [opener_node, closer_node] {
            if let NodeValue::Text(text) = arena.value_mut(node) {
                let keep = text.len().saturating_sub(used);
                text.truncate(keep);
            }
        }

        let emphasis = arena.alloc(if used == 1 {
            NodeValue::Emphasis
        } else {
            NodeValue::Strong
        });
        arena.move_siblings_after(opener_node, Some(closer_node), emphasis);
        arena.insert_after(opener_node, emphasis);

        let mut between = self.entries[o].next;
        while let Some(i) = between
            && i != c
        {
            between = self.entries[i].next;
            self.remove(i);
        }
        if self.entries[o].length == 0 {
            arena.detach(opener_node);
            self.remove(o);
        }
        if self.entries[c].length == 0 {
            arena.detach(closer_node);
            let next = self.entries[c].next;
            self.remove(c);
            next
        } else {
            Some(c)
        }
    }
}
