//! Topology validation and the oriented walk along linked tracks.

use log::info;

use super::pairing::{End, StitchNode};
use super::StitchStep;
use crate::error::{Result, TopologyFault};

/// The two tracks linked on only one end, lowest index first.
pub(crate) fn find_extremities(nodes: &[StitchNode]) -> Result<(usize, usize)> {
    let extremities: Vec<usize> = nodes
        .iter()
        .enumerate()
        .filter(|(_, node)| node.link_count() == 1)
        .map(|(i, _)| i)
        .collect();

    match extremities[..] {
        [first, last] => Ok((first, last)),
        _ => Err(TopologyFault::Extremities {
            link_counts: nodes.iter().map(StitchNode::link_count).collect(),
            extremities,
        }
        .into()),
    }
}

/// Walk from `start` along the links, deciding each track's orientation.
///
/// A track is reversed when the end facing the previous track is its end
/// rather than its start; the head is reversed when its only link is on its
/// start. Every track must be reached exactly once.
pub(crate) fn walk_path(nodes: &mut [StitchNode], start: usize) -> Result<Vec<StitchStep>> {
    let mut order = Vec::with_capacity(nodes.len());
    let mut current = start;
    let mut incoming: Option<End> = None;

    loop {
        let node = &mut nodes[current];
        node.visited = true;

        let outgoing = match incoming {
            Some(end) => end.opposite(),
            None if node.link(End::End).is_some() => End::End,
            None => End::Start,
        };
        order.push(StitchStep {
            source_index: current,
            reversed: outgoing == End::Start,
        });

        match node.link(outgoing) {
            Some(link) if !nodes[link.track].visited => {
                current = link.track;
                incoming = Some(link.end);
            }
            _ => break,
        }
    }

    if order.len() != nodes.len() {
        return Err(TopologyFault::Disconnected {
            start,
            visited: order.len(),
            total: nodes.len(),
        }
        .into());
    }

    info!(
        "[Stitcher] Path runs from track {} to track {}, {} reversed",
        start,
        current,
        order.iter().filter(|s| s.reversed).count()
    );

    Ok(order)
}
