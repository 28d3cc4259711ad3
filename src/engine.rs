//! The Optimisation Engine: a shortest-path solve over a DAG of
//! `Start -> stations (sorted by mile marker) -> End`, where an edge's
//! cost is the fuel bought at its upstream node.

use std::cmp::Ordering;
use std::collections::BinaryHeap;

use petgraph::graph::{Graph, NodeIndex};
use petgraph::visit::EdgeRef;
use petgraph::Directed;

use crate::domain::{FuelStation, FuelStopDecision, TrackerEntry};

/// Fixed per engine instance.
#[derive(Clone, Debug)]
pub struct EngineConfig {
    pub vehicle_range: f64,
    pub mpg: f64,
    pub price_weight: f64,
    pub deviation_weight: f64,
    /// Reserved. Intentionally unreferenced in `plan_trip` - the
    /// parameter's intended use was never resolved upstream, so it is
    /// carried on the config and left unused rather than guessed at.
    pub detour_penalty: f64,
}

impl Default for EngineConfig {
    fn default() -> Self {
        EngineConfig {
            vehicle_range: 500.0,
            mpg: 10.0,
            price_weight: 10.0,
            deviation_weight: 2.0,
            detour_penalty: 5.0,
        }
    }
}

/// Sentinel cost reported when `End` is unreachable under the range
/// constraint.
pub const INFEASIBLE_COST: f64 = -1.0;

/// Miles within which a station counts toward the starting price.
const START_PRICE_BUFFER_MILES: f64 = 15.0;

/// Fallback starting price when the catalogue has no candidates at all.
const FALLBACK_PRICE: f64 = 3.5;

pub struct PlanResult {
    pub stops: Vec<FuelStopDecision>,
    pub total_cost: f64,
    pub tracker: Vec<TrackerEntry>,
    pub total_gallons: f64,
}

impl PlanResult {
    fn infeasible() -> Self {
        PlanResult {
            stops: Vec::new(),
            total_cost: INFEASIBLE_COST,
            tracker: Vec::new(),
            total_gallons: 0.0,
        }
    }
}

pub struct OptimizationEngine {
    config: EngineConfig,
}

/// Edge weight on the plan graph: the miles actually driven on this
/// segment (route distance plus both endpoints' deviation) and the fuel
/// cost of driving it, charged at the upstream node's price.
#[derive(Clone, Copy)]
struct PlanEdge {
    segment_drive: f64,
    cost: f64,
}

impl OptimizationEngine {
    pub fn new(config: EngineConfig) -> Self {
        OptimizationEngine { config }
    }

    /// Plans the cheapest feasible sequence of refuelling stops for a drive
    /// of `route_distance` miles over the given candidate stations.
    pub fn plan_trip(&self, route_distance: f64, stations: &[FuelStation]) -> PlanResult {
        // A station snapped outside [0, route_distance] is dropped rather
        // than clamped.
        let mut sorted: Vec<FuelStation> = stations
            .iter()
            .filter(|s| s.route_mile_marker >= 0.0 && s.route_mile_marker <= route_distance)
            .cloned()
            .collect();
        sorted.sort_by(|a, b| {
            a.route_mile_marker
                .partial_cmp(&b.route_mile_marker)
                .unwrap_or(Ordering::Equal)
        });

        let start_price = starting_price(&sorted);
        let avg_price = average_price(stations);

        let mut nodes = Vec::with_capacity(sorted.len() + 2);
        nodes.push(FuelStation::start_node(start_price));
        nodes.extend(sorted);
        nodes.push(FuelStation::end_node(route_distance));

        let mut graph: Graph<(), PlanEdge, Directed> = Graph::new();
        let indices: Vec<NodeIndex> = (0..nodes.len()).map(|_| graph.add_node(())).collect();

        for u in 0..nodes.len() {
            for v in (u + 1)..nodes.len() {
                let route_dist = nodes[v].route_mile_marker - nodes[u].route_mile_marker;
                if route_dist > self.config.vehicle_range {
                    // Stations are sorted by mile marker: once the bare
                    // route distance alone exceeds range, no later v from
                    // this u can be feasible either.
                    break;
                }
                let segment_drive = route_dist + nodes[u].deviation_distance + nodes[v].deviation_distance;
                if segment_drive > self.config.vehicle_range {
                    continue;
                }
                let cost = (segment_drive / self.config.mpg) * nodes[u].retail_price;
                graph.add_edge(indices[u], indices[v], PlanEdge { segment_drive, cost });
            }
        }

        let end_idx = indices.len() - 1;
        let (best_cost, predecessor) = dijkstra(&graph, &indices, 0, end_idx);

        let Some(final_cost) = best_cost[end_idx] else {
            return PlanResult::infeasible();
        };

        let path = reconstruct_path(&predecessor, end_idx);
        let (stops, total_gallons) = build_stops(&nodes, &path, &self.config, avg_price);
        let tracker = build_tracker(&nodes, &path, &self.config);

        PlanResult {
            stops,
            total_cost: round2(final_cost),
            tracker,
            total_gallons: round2(total_gallons),
        }
    }
}

fn starting_price(sorted_stations: &[FuelStation]) -> f64 {
    let local: Vec<&FuelStation> = sorted_stations
        .iter()
        .filter(|s| s.route_mile_marker <= START_PRICE_BUFFER_MILES)
        .collect();
    if !local.is_empty() {
        local
            .iter()
            .map(|s| s.retail_price)
            .fold(f64::INFINITY, f64::min)
    } else if !sorted_stations.is_empty() {
        sorted_stations.iter().map(|s| s.retail_price).sum::<f64>() / sorted_stations.len() as f64
    } else {
        FALLBACK_PRICE
    }
}

fn average_price(stations: &[FuelStation]) -> f64 {
    if stations.is_empty() {
        FALLBACK_PRICE
    } else {
        stations.iter().map(|s| s.retail_price).sum::<f64>() / stations.len() as f64
    }
}

/// Min-heap entry ordered by ascending cost (`BinaryHeap` is a max-heap, so
/// `Ord` is reversed relative to the natural `f64` comparison).
struct HeapItem {
    cost: f64,
    node: usize,
}

impl PartialEq for HeapItem {
    fn eq(&self, other: &Self) -> bool {
        self.cost == other.cost
    }
}
impl Eq for HeapItem {}
impl PartialOrd for HeapItem {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        Some(self.cmp(other))
    }
}
impl Ord for HeapItem {
    fn cmp(&self, other: &Self) -> Ordering {
        other
            .cost
            .partial_cmp(&self.cost)
            .unwrap_or(Ordering::Equal)
    }
}

/// Dijkstra over the plan graph starting from node `start`. Non-negative
/// edge weights (fuel costs can't be negative) justify the algorithm.
/// Returns the best cost to each node and its predecessor on that path.
fn dijkstra(
    graph: &Graph<(), PlanEdge, Directed>,
    indices: &[NodeIndex],
    start: usize,
    end: usize,
) -> (Vec<Option<f64>>, Vec<Option<usize>>) {
    let n = indices.len();
    let mut best_cost: Vec<Option<f64>> = vec![None; n];
    let mut predecessor: Vec<Option<usize>> = vec![None; n];
    best_cost[start] = Some(0.0);

    let mut heap = BinaryHeap::new();
    heap.push(HeapItem { cost: 0.0, node: start });

    while let Some(HeapItem { cost, node: u }) = heap.pop() {
        if let Some(known) = best_cost[u] {
            if cost > known {
                continue; // stale entry
            }
        }
        if u == end {
            continue;
        }
        for edge in graph.edges(indices[u]) {
            let v = edge.target().index();
            let new_cost = cost + edge.weight().cost;
            let improves = match best_cost[v] {
                Some(existing) => new_cost < existing,
                None => true,
            };
            if improves {
                best_cost[v] = Some(new_cost);
                predecessor[v] = Some(u);
                heap.push(HeapItem { cost: new_cost, node: v });
            }
        }
    }

    (best_cost, predecessor)
}

fn reconstruct_path(predecessor: &[Option<usize>], end: usize) -> Vec<usize> {
    let mut path = vec![end];
    let mut current = end;
    while let Some(prev) = predecessor[current] {
        path.push(prev);
        current = prev;
    }
    path.reverse();
    path
}

fn segment_drive_distance(u: &FuelStation, v: &FuelStation) -> f64 {
    (v.route_mile_marker - u.route_mile_marker) + u.deviation_distance + v.deviation_distance
}

fn build_stops(
    nodes: &[FuelStation],
    path: &[usize],
    config: &EngineConfig,
    avg_price: f64,
) -> (Vec<FuelStopDecision>, f64) {
    let mut stops = Vec::new();
    let mut total_gallons = 0.0;

    for window in path.windows(2) {
        let (u_idx, v_idx) = (window[0], window[1]);
        let u = &nodes[u_idx];
        let v = &nodes[v_idx];
        let dist = segment_drive_distance(u, v);
        let gallons = dist / config.mpg;
        total_gallons += gallons;

        if u_idx != 0 {
            let cost = gallons * u.retail_price;
            stops.push(FuelStopDecision {
                station: u.clone(),
                mile_marker: u.route_mile_marker,
                gallons_filled: round2(gallons),
                cost: round2(cost),
                price_per_gallon: u.retail_price,
                score: score(u, avg_price, config),
            });
        }
    }

    (stops, total_gallons)
}

fn score(station: &FuelStation, avg_price: f64, config: &EngineConfig) -> f64 {
    let norm_price = if avg_price != 0.0 {
        station.retail_price / avg_price
    } else {
        1.0
    };
    let penalty = config.price_weight * norm_price + config.deviation_weight * station.deviation_distance;
    round2(10.0 / (1.0 + 0.1 * penalty))
}

fn build_tracker(nodes: &[FuelStation], path: &[usize], config: &EngineConfig) -> Vec<TrackerEntry> {
    let mut tracker = Vec::new();
    let mut cumulative_spent = 0.0;

    for window in path.windows(2) {
        let (u_idx, v_idx) = (window[0], window[1]);
        let u = &nodes[u_idx];
        let v = &nodes[v_idx];

        let start_mile = u.route_mile_marker.floor() as i64;
        let end_mile = v.route_mile_marker.floor() as i64;
        let miles_int = end_mile - start_mile;

        let dist = segment_drive_distance(u, v);
        let segment_cost = (dist / config.mpg) * u.retail_price;
        let cost_per_mile = if miles_int > 0 {
            segment_cost / miles_int as f64
        } else {
            0.0
        };

        for mile in (start_mile + 1)..=end_mile {
            cumulative_spent += cost_per_mile;
            tracker.push(TrackerEntry {
                mile,
                total_spent: round2(cumulative_spent),
            });
        }
    }

    tracker
}

fn round2(value: f64) -> f64 {
    (value * 100.0).round() / 100.0
}
