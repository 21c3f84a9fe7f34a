use std::fmt;

use thiserror::Error;
use tracing::debug;

use crate::range::{
    Action, ActionWeights, Cell, Chart, ChartSource, Position, Scenario, WeightedCell,
};

/// How the pot got heads-up to the flop.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum PotType {
    /// One raise, one call.
    #[cfg_attr(feature = "serde", serde(rename = "srp"))]
    SingleRaised,
    /// Open, 3-bet, call.
    #[cfg_attr(feature = "serde", serde(rename = "3bet"))]
    ThreeBet,
}

impl fmt::Display for PotType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::SingleRaised => write!(f, "srp"),
            Self::ThreeBet => write!(f, "3bet"),
        }
    }
}

/// Errors from resolving a seat pair to its two ranges.
#[derive(Error, Debug, PartialEq, Eq, Clone)]
pub enum ResolveError {
    #[error("OOP and IP cannot be the same position")]
    SamePosition,
}

/// One seat's resolved range and how it was derived.
#[derive(Debug, Clone)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct ResolvedRange {
    /// The filtered (and possibly cascaded) chart.
    pub chart: Chart,
    /// Human-readable derivation, e.g. `"BTN RFI"`.
    pub description: String,
}

/// Both seats' resolved ranges for a flop spot.
#[derive(Debug, Clone)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct ResolvedRanges {
    /// The out-of-position seat's range.
    pub oop: ResolvedRange,
    /// The in-position seat's range.
    pub ip: ResolvedRange,
}

/// Filter a chart down to the hands that take one of `allowed`, keeping only
/// those actions' shares.
///
/// Kept action percentages are renormalized to sum to 100 and the removed
/// share is pushed into the weight instead, so a hand that raised 60% and
/// called 40% filters under `[Raise]` to weight 60 with a pure raise split.
/// Cells that simplify to a full-weight single action come back as the bare
/// action.
///
/// # Examples
///
/// ```
/// use rangelab::analysis::filter_chart_by_actions;
/// use rangelab::range::{Action, Cell, Chart, HandClass};
///
/// let mut chart = Chart::new();
/// chart.set(HandClass::from_notation("AA").unwrap(), Action::Raise.into());
/// chart.set(HandClass::from_notation("QQ").unwrap(), Action::Call.into());
///
/// let raises = filter_chart_by_actions(&chart, &[Action::Raise, Action::AllIn]);
/// assert_eq!(raises.len(), 1);
/// ```
pub fn filter_chart_by_actions(chart: &Chart, allowed: &[Action]) -> Chart {
    let mut filtered = Chart::new();

    for (&hand, cell) in chart.iter() {
        let n = cell.normalize();
        if n.weight <= 0.0 {
            continue;
        }

        let kept: Vec<(Action, f64)> = allowed
            .iter()
            .map(|&a| (a, n.actions.get(a)))
            .filter(|&(_, pct)| pct > 0.0)
            .collect();
        let kept_total: f64 = kept.iter().map(|&(_, pct)| pct).sum();
        if kept_total <= 0.0 {
            continue;
        }

        let new_weight = n.weight * kept_total / 100.0;

        let new_cell = if kept.len() == 1 {
            let (action, _) = kept[0];
            if (new_weight - 100.0).abs() < 1e-9 {
                Cell::Action(action)
            } else {
                Cell::Weighted(WeightedCell {
                    weight: new_weight,
                    actions: ActionWeights::single(action),
                })
            }
        } else {
            let mut actions = ActionWeights::default();
            for (action, pct) in kept {
                actions.set(action, pct * 100.0 / kept_total);
            }
            Cell::Weighted(WeightedCell {
                weight: new_weight,
                actions,
            })
        };

        filtered.set(hand, new_cell);
    }

    filtered
}

/// Scale a chart's weights by how often each hand reached this decision
/// point at the parent decision.
///
/// A hand's parent weight is the aggressive (raise + all-in) share of its
/// cell in `parent`, as a percentage of all its combos. Hands the parent
/// never raises are dropped; hands it always raises pass through unchanged.
pub fn cascade_weights(chart: &Chart, parent: &Chart) -> Chart {
    let mut cascaded = Chart::new();

    for (&hand, cell) in chart.iter() {
        let p = parent.get_or_fold(hand).normalize();
        let parent_pct = p.weight / 100.0 * p.actions.aggressive();
        if parent_pct <= 0.0 {
            continue;
        }
        if parent_pct >= 100.0 {
            cascaded.set(hand, *cell);
            continue;
        }

        let n = cell.normalize();
        cascaded.set(
            hand,
            Cell::Weighted(WeightedCell {
                weight: n.weight * parent_pct / 100.0,
                actions: n.actions,
            }),
        );
    }

    cascaded
}

/// Look up, filter, and (when the scenario has a parent decision) cascade
/// one seat's chart. A missing chart resolves to empty; a missing parent
/// chart skips the cascade rather than zeroing everything out.
fn spot_chart<S: ChartSource>(
    source: &S,
    hero: Position,
    scenario: Scenario,
    villain: Option<Position>,
    allowed: &[Action],
) -> Chart {
    let filtered = match source.chart(hero, scenario, villain) {
        Some(chart) => filter_chart_by_actions(chart, allowed),
        None => Chart::new(),
    };

    if let Some(parent) = scenario.parent() {
        let parent_villain = if parent.requires_villain() {
            villain
        } else {
            None
        };
        if let Some(parent_chart) = source.chart(hero, parent, parent_villain) {
            return cascade_weights(&filtered, parent_chart);
        }
    }
    filtered
}

const OPEN_ACTIONS: [Action; 2] = [Action::Raise, Action::AllIn];
const CALL_ACTIONS: [Action; 1] = [Action::Call];

/// Resolve which two charts describe a heads-up flop between `oop` and `ip`.
///
/// Who opened is decided by preflop acting order: the earlier seat opened.
/// In a single-raised pot the opener's RFI chart is filtered to its raises
/// and the caller's vs-open chart to its calls. In a 3-bet pot the
/// non-opener 3-bet (its vs-open chart filtered to raises) and the opener
/// called (its vs-3bet chart filtered to calls, cascaded against its own
/// RFI chart since only the opened portion of its range saw the 3-bet).
///
/// # Errors
///
/// Fails when both seats are the same position.
pub fn resolve_ranges<S: ChartSource>(
    source: &S,
    pot_type: PotType,
    oop: Position,
    ip: Position,
) -> Result<ResolvedRanges, ResolveError> {
    if oop == ip {
        return Err(ResolveError::SamePosition);
    }

    let oop_opened = oop.preflop_index() < ip.preflop_index();

    let resolved = match (pot_type, oop_opened) {
        (PotType::SingleRaised, true) => ResolvedRanges {
            oop: ResolvedRange {
                chart: spot_chart(source, oop, Scenario::Rfi, None, &OPEN_ACTIONS),
                description: format!("{oop} RFI"),
            },
            ip: ResolvedRange {
                chart: spot_chart(source, ip, Scenario::VsOpen, Some(oop), &CALL_ACTIONS),
                description: format!("{ip} vs {oop} open (call)"),
            },
        },
        (PotType::SingleRaised, false) => ResolvedRanges {
            oop: ResolvedRange {
                chart: spot_chart(source, oop, Scenario::VsOpen, Some(ip), &CALL_ACTIONS),
                description: format!("{oop} vs {ip} open (call)"),
            },
            ip: ResolvedRange {
                chart: spot_chart(source, ip, Scenario::Rfi, None, &OPEN_ACTIONS),
                description: format!("{ip} RFI"),
            },
        },
        (PotType::ThreeBet, true) => ResolvedRanges {
            oop: ResolvedRange {
                chart: spot_chart(source, oop, Scenario::Vs3Bet, Some(ip), &CALL_ACTIONS),
                description: format!("{oop} vs {ip} 3bet (call)"),
            },
            ip: ResolvedRange {
                chart: spot_chart(source, ip, Scenario::VsOpen, Some(oop), &OPEN_ACTIONS),
                description: format!("{ip} 3bet vs {oop}"),
            },
        },
        (PotType::ThreeBet, false) => ResolvedRanges {
            oop: ResolvedRange {
                chart: spot_chart(source, oop, Scenario::VsOpen, Some(ip), &OPEN_ACTIONS),
                description: format!("{oop} 3bet vs {ip}"),
            },
            ip: ResolvedRange {
                chart: spot_chart(source, ip, Scenario::Vs3Bet, Some(oop), &CALL_ACTIONS),
                description: format!("{ip} vs {oop} 3bet (call)"),
            },
        },
    };

    debug!(
        %pot_type,
        %oop,
        %ip,
        oop_hands = resolved.oop.chart.len(),
        ip_hands = resolved.ip.chart.len(),
        "resolved ranges"
    );

    Ok(resolved)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::range::{ChartKey, ChartSet, HandClass};
    use test_log::test;

    fn class(s: &str) -> HandClass {
        HandClass::from_notation(s).unwrap()
    }

    fn weighted(weight: f64, pairs: &[(Action, f64)]) -> Cell {
        let mut actions = ActionWeights::default();
        for &(action, pct) in pairs {
            actions.set(action, pct);
        }
        Cell::Weighted(WeightedCell { weight, actions })
    }

    // ========== filter_chart_by_actions tests ==========

    #[test]
    fn test_filter_keeps_bare_action() {
        let mut chart = Chart::new();
        chart.set(class("AA"), Action::Raise.into());
        chart.set(class("QQ"), Action::Call.into());

        let filtered = filter_chart_by_actions(&chart, &[Action::Raise, Action::AllIn]);
        assert_eq!(filtered.len(), 1);
        assert_eq!(filtered.get_or_fold(class("AA")), Cell::Action(Action::Raise));
    }

    #[test]
    fn test_filter_weighted_split() {
        // 60% raise / 40% call filtered to raises keeps 60% of the combos.
        let mut chart = Chart::new();
        chart.set(
            class("QQ"),
            weighted(100.0, &[(Action::Raise, 60.0), (Action::Call, 40.0)]),
        );

        let filtered = filter_chart_by_actions(&chart, &[Action::Raise]);
        let cell = filtered.get_or_fold(class("QQ"));
        assert_eq!(
            cell,
            weighted(60.0, &[(Action::Raise, 100.0)]),
        );
    }

    #[test]
    fn test_filter_mixed_cell() {
        let mut chart = Chart::new();
        chart.set(class("AJs"), Cell::Mixed(Action::Raise, Action::Call));

        let filtered = filter_chart_by_actions(&chart, &[Action::Call]);
        assert_eq!(
            filtered.get_or_fold(class("AJs")),
            weighted(50.0, &[(Action::Call, 100.0)]),
        );
    }

    #[test]
    fn test_filter_keeps_multiple_actions() {
        let mut chart = Chart::new();
        chart.set(
            class("AKs"),
            weighted(100.0, &[(Action::Raise, 70.0), (Action::AllIn, 30.0)]),
        );

        let filtered = filter_chart_by_actions(&chart, &[Action::Raise, Action::AllIn]);
        assert_eq!(
            filtered.get_or_fold(class("AKs")),
            weighted(100.0, &[(Action::Raise, 70.0), (Action::AllIn, 30.0)]),
        );
    }

    #[test]
    fn test_filter_renormalizes_kept_actions() {
        // Raise 40 / allin 20 / call 40, keep the aggressive 60%.
        let mut chart = Chart::new();
        chart.set(
            class("KK"),
            weighted(
                100.0,
                &[(Action::Raise, 40.0), (Action::AllIn, 20.0), (Action::Call, 40.0)],
            ),
        );

        let filtered = filter_chart_by_actions(&chart, &[Action::Raise, Action::AllIn]);
        let cell = filtered.get_or_fold(class("KK")).normalize();
        assert_eq!(cell.weight, 60.0);
        assert!((cell.actions.raise - 66.66666666666667).abs() < 1e-9);
        assert!((cell.actions.allin - 33.333333333333336).abs() < 1e-9);
    }

    #[test]
    fn test_filter_drops_zero_weight_and_folds() {
        let mut chart = Chart::new();
        chart.set(class("72o"), Action::Fold.into());
        chart.set(class("T9s"), weighted(0.0, &[(Action::Raise, 100.0)]));
        chart.set(class("QQ"), Action::Call.into());

        let filtered = filter_chart_by_actions(&chart, &[Action::Raise]);
        assert!(filtered.is_empty());
    }

    // ========== cascade_weights tests ==========

    #[test]
    fn test_cascade_full_parent_is_unchanged() {
        let mut child = Chart::new();
        child.set(class("AA"), Action::Call.into());
        let mut parent = Chart::new();
        parent.set(class("AA"), Action::Raise.into());

        let cascaded = cascade_weights(&child, &parent);
        assert_eq!(cascaded.get_or_fold(class("AA")), Cell::Action(Action::Call));
    }

    #[test]
    fn test_cascade_scales_by_parent_aggression() {
        let mut child = Chart::new();
        child.set(class("A5s"), Action::Call.into());
        let mut parent = Chart::new();
        parent.set(class("A5s"), Cell::Mixed(Action::Raise, Action::Fold));

        let cascaded = cascade_weights(&child, &parent);
        let n = cascaded.get_or_fold(class("A5s")).normalize();
        assert_eq!(n.weight, 50.0);
        assert_eq!(n.actions.call, 100.0);
    }

    #[test]
    fn test_cascade_drops_hands_parent_never_raises() {
        let mut child = Chart::new();
        child.set(class("AA"), Action::Call.into());
        child.set(class("QQ"), Action::Call.into());
        let mut parent = Chart::new();
        parent.set(class("AA"), Action::Raise.into());
        parent.set(class("QQ"), Action::Call.into());

        let cascaded = cascade_weights(&child, &parent);
        assert_eq!(cascaded.len(), 1);
        assert!(cascaded.get(class("QQ")).is_none());
    }

    #[test]
    fn test_cascade_empty_parent_drops_all() {
        let mut child = Chart::new();
        child.set(class("AA"), Action::Call.into());
        let cascaded = cascade_weights(&child, &Chart::new());
        assert!(cascaded.is_empty());
    }

    // ========== resolve_ranges tests ==========

    fn sample_set() -> ChartSet {
        let mut set = ChartSet::new();

        let mut co_rfi = Chart::new();
        co_rfi.set(class("AA"), Action::Raise.into());
        co_rfi.set(class("A5s"), Cell::Mixed(Action::Raise, Action::Fold));
        set.insert(ChartKey::new(Position::CO, Scenario::Rfi, None), co_rfi);

        let mut btn_vs_co = Chart::new();
        btn_vs_co.set(class("QQ"), Action::Call.into());
        btn_vs_co.set(class("KK"), Action::Raise.into());
        set.insert(
            ChartKey::new(Position::BTN, Scenario::VsOpen, Some(Position::CO)),
            btn_vs_co,
        );

        let mut co_vs_3bet = Chart::new();
        co_vs_3bet.set(class("AA"), Action::Call.into());
        co_vs_3bet.set(class("A5s"), Action::Call.into());
        co_vs_3bet.set(class("JJ"), Action::Call.into());
        set.insert(
            ChartKey::new(Position::CO, Scenario::Vs3Bet, Some(Position::BTN)),
            co_vs_3bet,
        );

        set
    }

    #[test]
    fn test_same_position_is_an_error() {
        let err = resolve_ranges(
            &ChartSet::new(),
            PotType::SingleRaised,
            Position::UTG,
            Position::UTG,
        )
        .unwrap_err();
        assert_eq!(err, ResolveError::SamePosition);
        assert_eq!(err.to_string(), "OOP and IP cannot be the same position");
    }

    #[test]
    fn test_srp_oop_opened() {
        let resolved = resolve_ranges(
            &sample_set(),
            PotType::SingleRaised,
            Position::CO,
            Position::BTN,
        )
        .unwrap();

        assert_eq!(resolved.oop.description, "CO RFI");
        assert_eq!(resolved.ip.description, "BTN vs CO open (call)");

        // The opener keeps only the raising portion.
        assert_eq!(
            resolved.oop.chart.get_or_fold(class("AA")),
            Cell::Action(Action::Raise)
        );
        let a5s = resolved.oop.chart.get_or_fold(class("A5s")).normalize();
        assert_eq!(a5s.weight, 50.0);

        // The caller keeps calls only: KK 3-bet, so it's gone.
        assert_eq!(resolved.ip.chart.len(), 1);
        assert_eq!(
            resolved.ip.chart.get_or_fold(class("QQ")),
            Cell::Action(Action::Call)
        );
    }

    #[test]
    fn test_srp_ip_opened() {
        let mut set = ChartSet::new();
        let mut btn_rfi = Chart::new();
        btn_rfi.set(class("AA"), Action::Raise.into());
        set.insert(ChartKey::new(Position::BTN, Scenario::Rfi, None), btn_rfi);
        let mut bb_vs_btn = Chart::new();
        bb_vs_btn.set(class("T9s"), Action::Call.into());
        set.insert(
            ChartKey::new(Position::BB, Scenario::VsOpen, Some(Position::BTN)),
            bb_vs_btn,
        );

        let resolved =
            resolve_ranges(&set, PotType::SingleRaised, Position::BB, Position::BTN).unwrap();
        assert_eq!(resolved.oop.description, "BB vs BTN open (call)");
        assert_eq!(resolved.ip.description, "BTN RFI");
        assert_eq!(resolved.oop.chart.len(), 1);
        assert_eq!(resolved.ip.chart.len(), 1);
    }

    #[test]
    fn test_3bet_pot_cascades_the_caller() {
        let resolved = resolve_ranges(
            &sample_set(),
            PotType::ThreeBet,
            Position::CO,
            Position::BTN,
        )
        .unwrap();

        assert_eq!(resolved.oop.description, "CO vs BTN 3bet (call)");
        assert_eq!(resolved.ip.description, "BTN 3bet vs CO");

        // AA was always opened: full weight survives.
        assert_eq!(
            resolved.oop.chart.get_or_fold(class("AA")),
            Cell::Action(Action::Call)
        );
        // A5s was opened half the time: half the calling weight survives.
        let a5s = resolved.oop.chart.get_or_fold(class("A5s")).normalize();
        assert_eq!(a5s.weight, 50.0);
        // JJ was never opened, so it can't be calling a 3-bet.
        assert!(resolved.oop.chart.get(class("JJ")).is_none());

        // The 3-bettor's chart is the aggressive slice of its vs-open chart.
        assert_eq!(resolved.ip.chart.len(), 1);
        assert_eq!(
            resolved.ip.chart.get_or_fold(class("KK")),
            Cell::Action(Action::Raise)
        );
    }

    #[test]
    fn test_missing_charts_resolve_empty() {
        let resolved = resolve_ranges(
            &ChartSet::new(),
            PotType::SingleRaised,
            Position::SB,
            Position::BTN,
        )
        .unwrap();
        assert!(resolved.oop.chart.is_empty());
        assert!(resolved.ip.chart.is_empty());
    }
}
