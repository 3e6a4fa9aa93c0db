// Overlap grouping
// Connected components of the strict interval-overlap graph

use crate::models::event::Event;

/// One visual cluster of mutually reachable overlapping events
///
/// Holds indices into the day slice it was built from, ordered by
/// `(start, input index)`. The rank of an event inside its group drives
/// its column placement.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct OverlapGroup {
    indices: Vec<usize>,
}

impl OverlapGroup {
    pub fn len(&self) -> usize {
        self.indices.len()
    }

    pub fn is_empty(&self) -> bool {
        self.indices.is_empty()
    }

    /// Member indices into the originating slice, in start order
    pub fn indices(&self) -> &[usize] {
        &self.indices
    }

    /// Position of `index` in the group's start-sorted order
    pub fn rank_of(&self, index: usize) -> Option<usize> {
        self.indices.iter().position(|&i| i == index)
    }
}

/// Strict interval overlap; touching endpoints do not overlap
pub fn overlaps(a: &Event, b: &Event) -> bool {
    a.start < b.end && b.start < a.end
}

/// Partition one day's events into connected components of the overlap
/// graph
///
/// Every input index lands in exactly one group. Chained overlaps join a
/// single group even when the outer events never touch each other, so a
/// staggered run of events shares one column set instead of painting over
/// itself. Groups come back ordered by their earliest start; ties keep
/// input order.
///
/// Pairwise adjacency is O(n²), fine for a single day's worth of events.
pub fn group_overlapping(events: &[Event]) -> Vec<OverlapGroup> {
    let n = events.len();
    let mut adjacency: Vec<Vec<usize>> = vec![Vec::new(); n];
    for i in 0..n {
        for j in (i + 1)..n {
            if overlaps(&events[i], &events[j]) {
                adjacency[i].push(j);
                adjacency[j].push(i);
            }
        }
    }

    let mut visited = vec![false; n];
    let mut groups = Vec::new();

    for root in 0..n {
        if visited[root] {
            continue;
        }
        visited[root] = true;

        // Depth-first over the adjacency lists with an explicit stack
        let mut members = vec![root];
        let mut stack = vec![root];
        while let Some(current) = stack.pop() {
            for &next in &adjacency[current] {
                if !visited[next] {
                    visited[next] = true;
                    members.push(next);
                    stack.push(next);
                }
            }
        }

        members.sort_by(|&a, &b| events[a].start.cmp(&events[b].start).then(a.cmp(&b)));
        groups.push(OverlapGroup { indices: members });
    }

    groups.sort_by_key(|group| events[group.indices[0]].start);
    groups
}
