//! Endpoint collection and greedy nearest-endpoint pairing.

use std::fmt;

use log::debug;
use serde::{Deserialize, Serialize};

use crate::error::{Result, TopologyFault};
use crate::{GeoPoint, Track};

/// Which end of a track.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum End {
    Start,
    End,
}

impl End {
    pub fn opposite(self) -> End {
        match self {
            End::Start => End::End,
            End::End => End::Start,
        }
    }

    fn slot(self) -> usize {
        match self {
            End::Start => 0,
            End::End => 1,
        }
    }
}

impl fmt::Display for End {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            End::Start => f.write_str("start"),
            End::End => f.write_str("end"),
        }
    }
}

/// First or last point of an input track.
#[derive(Debug, Clone, Copy)]
pub(crate) struct Endpoint {
    pub track: usize,
    pub end: End,
    pub point: GeoPoint,
}

/// Two endpoints of different tracks and their distance.
#[derive(Debug, Clone, Copy)]
pub(crate) struct CandidatePair {
    pub a: Endpoint,
    pub b: Endpoint,
    pub distance_km: f64,
}

/// The endpoint on the other side of a pairing.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(crate) struct Link {
    pub track: usize,
    pub end: End,
}

/// Per-track bookkeeping while stitching, indexed like the input tracks.
#[derive(Debug, Clone, Default)]
pub(crate) struct StitchNode {
    links: [Option<Link>; 2],
    pub visited: bool,
}

impl StitchNode {
    pub fn link(&self, end: End) -> Option<Link> {
        self.links[end.slot()]
    }

    pub fn link_count(&self) -> usize {
        self.links.iter().flatten().count()
    }

    fn set_link(&mut self, end: End, link: Link) {
        self.links[end.slot()] = Some(link);
    }
}

/// Start and end of every track, in input order.
pub(crate) fn collect_endpoints(tracks: &[Track]) -> Result<Vec<Endpoint>> {
    let mut endpoints = Vec::with_capacity(tracks.len() * 2);

    for (track, t) in tracks.iter().enumerate() {
        let (Some(start), Some(end)) = (t.start_point(), t.end_point()) else {
            return Err(TopologyFault::EmptyTrack { track }.into());
        };
        endpoints.push(Endpoint {
            track,
            end: End::Start,
            point: *start,
        });
        endpoints.push(Endpoint {
            track,
            end: End::End,
            point: *end,
        });
    }

    Ok(endpoints)
}

/// Pairs from `endpoints[outer]` to every later endpoint on another track.
fn pairs_from(endpoints: &[Endpoint], outer: usize) -> impl Iterator<Item = CandidatePair> + '_ {
    let a = endpoints[outer];
    endpoints[outer + 1..]
        .iter()
        .filter(move |b| b.track != a.track)
        .map(move |b| CandidatePair {
            a,
            b: *b,
            distance_km: a.point.distance_to(&b.point),
        })
}

/// All cross-track endpoint pairs, nearest first. Equal distances keep
/// enumeration order.
pub(crate) fn candidate_pairs(endpoints: &[Endpoint]) -> Vec<CandidatePair> {
    #[cfg(feature = "parallel")]
    let mut pairs: Vec<CandidatePair> = {
        use rayon::prelude::*;
        (0..endpoints.len())
            .into_par_iter()
            .flat_map_iter(|outer| pairs_from(endpoints, outer))
            .collect()
    };

    #[cfg(not(feature = "parallel"))]
    let mut pairs: Vec<CandidatePair> = (0..endpoints.len())
        .flat_map(|outer| pairs_from(endpoints, outer))
        .collect();

    pairs.sort_by(|l, r| l.distance_km.total_cmp(&r.distance_km));
    pairs
}

/// Greedily link endpoints, nearest pairs first, until the tracks form
/// `nodes.len() - 1` pairings. An endpoint takes at most one link.
pub(crate) fn link_nearest(nodes: &mut [StitchNode], pairs: &[CandidatePair]) -> Result<()> {
    let required = nodes.len().saturating_sub(1);
    let mut paired = 0;

    for pair in pairs {
        if paired == required {
            break;
        }
        let (a, b) = (pair.a, pair.b);
        if nodes[a.track].link(a.end).is_some() || nodes[b.track].link(b.end).is_some() {
            continue;
        }

        nodes[a.track].set_link(
            a.end,
            Link {
                track: b.track,
                end: b.end,
            },
        );
        nodes[b.track].set_link(
            b.end,
            Link {
                track: a.track,
                end: a.end,
            },
        );
        paired += 1;

        debug!(
            "[Stitcher] Linked track {} {} to track {} {} ({:.6} km)",
            a.track, a.end, b.track, b.end, pair.distance_km
        );
    }

    if paired < required {
        return Err(TopologyFault::PairingExhausted { paired, required }.into());
    }
    Ok(())
}
