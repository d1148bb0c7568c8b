use std::cmp::Ordering;

use hermes_core::{Direction, ExecutionLine, ExecutionPlan, Price, Quantity, Venue};
use log::{debug, warn};
use rust_decimal::Decimal;

use crate::error::{AllocationError, AllocationResult};

/// Outcome of a successful allocation
///
/// `venues` is the working copy of the snapshot with every fill applied:
/// balances moved, order sizes reduced and exhausted orders removed.
#[derive(Debug, Clone, PartialEq)]
pub struct Allocation {
    pub plan: ExecutionPlan,
    pub venues: Vec<Venue>,
}

/// Position of a resting order inside the working copy
#[derive(Debug, Clone, Copy)]
struct Candidate {
    venue: usize,
    order: usize,
    price: Price,
}

/// Balance-constrained price-priority sweep across independent venues
///
/// Orders are consumed in this sequence:
/// 1. Best price for the caller (lowest ask when acquiring, highest bid when disposing)
/// 2. Discovery order (venue order, then position in the venue's book) at equal price
///
/// Each fill is capped by the order's remaining size, the venue's balance
/// ceiling and the outstanding quantity. The engine never touches the
/// snapshot it is given; it works on a private copy.
#[derive(Debug, Clone, Copy, Default)]
pub struct AllocationEngine;

impl AllocationEngine {
    pub fn new() -> Self {
        Self
    }

    pub fn name(&self) -> &'static str {
        "Balance-Constrained Price Priority"
    }

    /// Allocate `requested` units of the base asset across `snapshot`.
    ///
    /// Succeeds only when the full quantity is filled; on shortfall the
    /// working copy is dropped and the caller's snapshot is unchanged.
    pub fn allocate(
        &self,
        snapshot: &[Venue],
        requested: Quantity,
        direction: Direction,
    ) -> AllocationResult<Allocation> {
        if snapshot.is_empty() {
            return Err(AllocationError::NoLiquiditySource);
        }
        if requested <= Decimal::ZERO {
            return Err(AllocationError::InvalidQuantity(requested));
        }

        let mut venues = snapshot.to_vec();
        let candidates = Self::rank(&venues, direction);
        let mut plan = ExecutionPlan::new(direction);
        let mut outstanding = requested;

        for candidate in candidates {
            if outstanding <= Decimal::ZERO {
                break;
            }

            let venue = &mut venues[candidate.venue];
            let available = venue.book(direction)[candidate.order].remaining;
            let ceiling = venue.balance_ceiling(direction, candidate.price);
            let fill = available.min(ceiling).min(outstanding);

            if fill <= Decimal::ZERO {
                debug!(
                    "Skipping order {} on {}: available={}, ceiling={}",
                    venue.book(direction)[candidate.order].id,
                    venue.name,
                    available,
                    ceiling
                );
                continue;
            }

            let overflow = |venue: &Venue| {
                warn!(
                    "Arithmetic overflow on {} at price {}; rejecting allocation",
                    venue.name, candidate.price
                );
                AllocationError::ArithmeticOverflow {
                    venue: venue.name.clone(),
                    order_id: venue.book(direction)[candidate.order].id,
                }
            };

            if venue.settle(direction, fill, candidate.price).is_none() {
                return Err(overflow(venue));
            }
            let (order_id, remaining) = {
                let order = &mut venue.book_mut(direction)[candidate.order];
                order.consume(fill);
                (order.id, order.remaining)
            };
            outstanding -= fill;

            debug!(
                "Fill: {} {} @ {} on {} (order {}, remaining {})",
                direction, fill, candidate.price, venue.name, order_id, remaining
            );

            plan.record(ExecutionLine {
                order_id,
                venue_id: venue.id,
                venue_name: venue.name.clone(),
                size: fill,
                price: candidate.price,
            })
            .ok_or_else(|| overflow(venue))?;
        }

        if outstanding > Decimal::ZERO {
            return Err(AllocationError::InsufficientLiquidity {
                requested,
                filled: requested - outstanding,
            });
        }

        for venue in &mut venues {
            venue.prune_exhausted();
        }

        Ok(Allocation { plan, venues })
    }

    /// Collect usable orders and sort them best price first.
    ///
    /// `sort_by` is stable, so equal prices keep discovery order.
    fn rank(venues: &[Venue], direction: Direction) -> Vec<Candidate> {
        let side = direction.counter_side();
        let mut candidates = Vec::new();

        for (venue_idx, venue) in venues.iter().enumerate() {
            for (order_idx, order) in venue.book(direction).iter().enumerate() {
                if order.side != side {
                    debug!(
                        "Ignoring order {} on {}: tagged {} in the {} book",
                        order.id, venue.name, order.side, side
                    );
                    continue;
                }
                if order.price <= Decimal::ZERO {
                    warn!(
                        "Ignoring order {} on {} with non-positive price {}",
                        order.id, venue.name, order.price
                    );
                    continue;
                }
                candidates.push(Candidate {
                    venue: venue_idx,
                    order: order_idx,
                    price: order.price,
                });
            }
        }

        candidates.sort_by(|a, b| price_priority(direction, a.price, b.price));
        candidates
    }
}

fn price_priority(direction: Direction, a: Price, b: Price) -> Ordering {
    match direction {
        Direction::Acquire => a.cmp(&b),
        Direction::Dispose => b.cmp(&a),
    }
}
