use slotmap::{SlotMap, new_key_type};

use crate::domain::process::{Process, Time};

new_key_type! {
    /// Handle to a process while it sits in a `ReadyQueue`. Only valid for the queue that issued it.
    pub struct ProcessKey;
}

#[derive(Debug, Clone)]
struct QueueNode {
    process: Process,
    prev: Option<ProcessKey>,
    next: Option<ProcessKey>,
}

/// Doubly-linked sequence of processes stored in an arena.
///
/// Nodes are addressed by `ProcessKey`, so reordering is a relink of handles instead of moving
/// processes around. The length is the arena length and can't drift from the link count.
#[derive(Debug, Clone, Default)]
pub struct ReadyQueue {
    nodes: SlotMap<ProcessKey, QueueNode>,
    head: Option<ProcessKey>,
    foot: Option<ProcessKey>,
}

impl ReadyQueue {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn len(&self) -> usize {
        self.nodes.len()
    }

    pub fn is_empty(&self) -> bool {
        self.head.is_none()
    }

    pub fn push_front(&mut self, process: Process) -> ProcessKey {
        let key = self.nodes.insert(QueueNode { process, prev: None, next: self.head });
        match self.head {
            Some(old_head) => self.nodes[old_head].prev = Some(key),
            None => self.foot = Some(key),
        }
        self.head = Some(key);
        key
    }

    pub fn push_back(&mut self, process: Process) -> ProcessKey {
        let key = self.nodes.insert(QueueNode { process, prev: self.foot, next: None });
        match self.foot {
            Some(old_foot) => self.nodes[old_foot].next = Some(key),
            None => self.head = Some(key),
        }
        self.foot = Some(key);
        key
    }

    pub fn pop_front(&mut self) -> Option<Process> {
        let key = self.head?;
        self.remove(key)
    }

    pub fn pop_back(&mut self) -> Option<Process> {
        let key = self.foot?;
        self.remove(key)
    }

    pub fn front(&self) -> Option<&Process> {
        self.head.map(|key| &self.nodes[key].process)
    }

    pub fn head_key(&self) -> Option<ProcessKey> {
        self.head
    }

    pub fn next_key(&self, key: ProcessKey) -> Option<ProcessKey> {
        self.nodes.get(key).and_then(|node| node.next)
    }

    pub fn get(&self, key: ProcessKey) -> Option<&Process> {
        self.nodes.get(key).map(|node| &node.process)
    }

    pub fn get_mut(&mut self, key: ProcessKey) -> Option<&mut Process> {
        self.nodes.get_mut(key).map(|node| &mut node.process)
    }

    pub fn iter(&self) -> Iter<'_> {
        Iter { queue: self, cursor: self.head }
    }

    /// Handles in queue order, head first.
    pub fn keys(&self) -> Vec<ProcessKey> {
        let mut keys = Vec::with_capacity(self.len());
        let mut cursor = self.head;
        while let Some(key) = cursor {
            keys.push(key);
            cursor = self.nodes[key].next;
        }
        keys
    }

    pub fn total_remaining_time(&self) -> Time {
        self.iter().map(|process| process.remaining_time).sum()
    }

    /// First process from the head that holds at least one frame. Queue order approximates
    /// admission order, so this is the least recently admitted holder.
    pub fn least_recently_admitted_with_pages(&self) -> Option<ProcessKey> {
        self.first_holder_from(self.head)
    }

    /// Next holder strictly after `key`.
    pub fn next_holder_after(&self, key: ProcessKey) -> Option<ProcessKey> {
        self.first_holder_from(self.next_key(key))
    }

    fn first_holder_from(&self, start: Option<ProcessKey>) -> Option<ProcessKey> {
        let mut cursor = start;
        while let Some(key) = cursor {
            let node = &self.nodes[key];
            if node.process.pages_used() > 0 {
                return Some(key);
            }
            cursor = node.next;
        }
        None
    }

    /// Stable ordering by arrival time, ties broken by ascending pid. Applied once to the pending
    /// list after loading.
    pub fn stable_order_by_arrival_and_pid(&mut self) {
        self.insertion_sort_by_key(|process| (process.arrival_time, process.pid));
    }

    /// Stable ordering by the original job length (not the live remaining time).
    pub fn order_by_job_time(&mut self) {
        self.insertion_sort_by_key(|process| process.job_time);
    }

    fn insertion_sort_by_key<K: Ord>(&mut self, sort_key: impl Fn(&Process) -> K) {
        let mut cursor = self.head;

        while let Some(current) = cursor {
            let next = self.nodes[current].next;
            let current_key = sort_key(&self.nodes[current].process);

            let mut insert_at = current;
            while let Some(prev) = self.nodes[insert_at].prev {
                if sort_key(&self.nodes[prev].process) > current_key {
                    insert_at = prev;
                } else {
                    break;
                }
            }

            if insert_at != current {
                self.move_before(current, insert_at);
            }
            cursor = next;
        }
    }

    /// Relinks `key` directly in front of `anchor`. Both handles must belong to this queue.
    pub fn move_before(&mut self, key: ProcessKey, anchor: ProcessKey) {
        if key == anchor || !self.nodes.contains_key(key) || !self.nodes.contains_key(anchor) {
            return;
        }

        self.unlink(key);

        let prev = self.nodes[anchor].prev;
        self.nodes[key].prev = prev;
        self.nodes[key].next = Some(anchor);
        self.nodes[anchor].prev = Some(key);
        match prev {
            Some(prev) => self.nodes[prev].next = Some(key),
            None => self.head = Some(key),
        }
    }

    fn unlink(&mut self, key: ProcessKey) {
        let (prev, next) = {
            let node = &self.nodes[key];
            (node.prev, node.next)
        };

        match prev {
            Some(prev) => self.nodes[prev].next = next,
            None => self.head = next,
        }
        match next {
            Some(next) => self.nodes[next].prev = prev,
            None => self.foot = prev,
        }
    }

    fn remove(&mut self, key: ProcessKey) -> Option<Process> {
        self.unlink(key);
        self.nodes.remove(key).map(|node| node.process)
    }
}

impl FromIterator<Process> for ReadyQueue {
    fn from_iter<T: IntoIterator<Item = Process>>(iter: T) -> Self {
        let mut queue = ReadyQueue::new();
        for process in iter {
            queue.push_back(process);
        }
        queue
    }
}

pub struct Iter<'a> {
    queue: &'a ReadyQueue,
    cursor: Option<ProcessKey>,
}

impl<'a> Iterator for Iter<'a> {
    type Item = &'a Process;

    fn next(&mut self) -> Option<Self::Item> {
        let key = self.cursor?;
        let node = &self.queue.nodes[key];
        self.cursor = node.next;
        Some(&node.process)
    }
}

/// Moves every process at the front of `pending` that has arrived by `clock` to the back of
/// `arrived`. Stops at the first later arrival. Returns how many were admitted.
pub fn admit_arrivals(clock: Time, pending: &mut ReadyQueue, arrived: &mut ReadyQueue) -> usize {
    let mut admitted = 0;

    while pending.front().is_some_and(|process| process.arrival_time <= clock) {
        if let Some(process) = pending.pop_front() {
            log::trace!("t={} admitting pid {}", clock, process.pid);
            arrived.push_back(process);
            admitted += 1;
        }
    }

    admitted
}
