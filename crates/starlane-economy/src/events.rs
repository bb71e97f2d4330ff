//! Economic events: creation, daily trigger rolls and expiry.
//!
//! # Registry
//!
//! | Kind                | Days | Modifiers                      | Chance | Systems     |
//! |---------------------|------|--------------------------------|--------|-------------|
//! | `mining_strike`     | 5-10 | ore 1.5, tritium 1.3           | 5%     | M, L, T     |
//! | `medical_emergency` | 3-5  | medicine 2.0, grain 0.9, ore 0.9 | 3%   | any         |
//! | `festival`          | 2-4  | electronics 1.75, grain 1.2    | 4%     | core (0, 1) |
//! | `supply_glut`       | 3-7  | one random commodity 0.6       | 6%     | any         |
//!
//! # Determinism
//!
//! Every roll uses its own [`SeededRng`] built from a descriptive seed:
//!
//! - trigger: `event_{kind}_{system}_{day}`
//! - duration: `duration_{id}`
//! - glut commodity: `commodity_{id}`
//!
//! where `id` is `{kind}_{system}_{day}`. Replaying a day from the same
//! state therefore always creates the same events.

use std::collections::BTreeMap;

use rust_decimal::Decimal;
use starlane_types::{Commodity, MarketEvent, MarketEventKind, SpectralClass, StarSystem, SystemId};
use tracing::{debug, info};

use crate::rng::SeededRng;

/// The two core systems eligible for festivals.
pub const CORE_SYSTEMS: [SystemId; 2] = [SystemId(0), SystemId(1)];

/// Spectral classes eligible for mining strikes.
const MINING_CLASSES: [SpectralClass; 3] = [SpectralClass::M, SpectralClass::L, SpectralClass::T];

/// Which systems an event kind may target.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum EligibilityRule {
    /// Every system.
    Any,
    /// Only [`CORE_SYSTEMS`].
    Core,
    /// Only systems whose spectral class is M, L or T.
    Mining,
}

/// Static parameters of an event kind.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct EventDefinition {
    /// The kind described.
    pub kind: MarketEventKind,
    /// Shortest duration in days (inclusive).
    pub min_duration: u32,
    /// Longest duration in days (inclusive).
    pub max_duration: u32,
    /// Daily trigger probability per eligible system.
    pub chance: f64,
    /// Target-system rule.
    pub rule: EligibilityRule,
}

/// Look up the registry entry of an event kind.
pub const fn definition(kind: MarketEventKind) -> EventDefinition {
    match kind {
        MarketEventKind::MiningStrike => EventDefinition {
            kind,
            min_duration: 5,
            max_duration: 10,
            chance: 0.05,
            rule: EligibilityRule::Mining,
        },
        MarketEventKind::MedicalEmergency => EventDefinition {
            kind,
            min_duration: 3,
            max_duration: 5,
            chance: 0.03,
            rule: EligibilityRule::Any,
        },
        MarketEventKind::Festival => EventDefinition {
            kind,
            min_duration: 2,
            max_duration: 4,
            chance: 0.04,
            rule: EligibilityRule::Core,
        },
        MarketEventKind::SupplyGlut => EventDefinition {
            kind,
            min_duration: 3,
            max_duration: 7,
            chance: 0.06,
            rule: EligibilityRule::Any,
        },
    }
}

/// Whether `system` may host an event under `rule`.
pub fn is_eligible(rule: EligibilityRule, system: &StarSystem) -> bool {
    match rule {
        EligibilityRule::Any => true,
        EligibilityRule::Core => CORE_SYSTEMS.contains(&system.id),
        EligibilityRule::Mining => system
            .spectral_class()
            .is_some_and(|class| MINING_CLASSES.contains(&class)),
    }
}

/// Fixed modifier table of a kind. Supply gluts have none until created.
pub fn static_modifiers(kind: MarketEventKind) -> BTreeMap<Commodity, Decimal> {
    let entries: &[(Commodity, Decimal)] = match kind {
        MarketEventKind::MiningStrike => &[
            (Commodity::Ore, Decimal::from_parts(15, 0, 0, false, 1)),
            (Commodity::Tritium, Decimal::from_parts(13, 0, 0, false, 1)),
        ],
        MarketEventKind::MedicalEmergency => &[
            (Commodity::Medicine, Decimal::TWO),
            (Commodity::Grain, Decimal::from_parts(9, 0, 0, false, 1)),
            (Commodity::Ore, Decimal::from_parts(9, 0, 0, false, 1)),
        ],
        MarketEventKind::Festival => &[
            (Commodity::Electronics, Decimal::from_parts(175, 0, 0, false, 2)),
            (Commodity::Grain, Decimal::from_parts(12, 0, 0, false, 1)),
        ],
        MarketEventKind::SupplyGlut => &[],
    };
    entries.iter().copied().collect()
}

/// Price factor applied to the commodity a supply glut floods.
pub const GLUT_FACTOR: Decimal = Decimal::from_parts(6, 0, 0, false, 1);

/// Deterministic id of an event.
pub fn event_id(kind: MarketEventKind, system_id: SystemId, day: u32) -> String {
    format!("{}_{system_id}_{day}", kind.key())
}

/// Roll the daily trigger for a kind at a system.
pub fn rolls_trigger(kind: MarketEventKind, system_id: SystemId, day: u32) -> bool {
    let seed = format!("event_{}_{system_id}_{day}", kind.key());
    SeededRng::new(&seed).next() < definition(kind).chance
}

/// Build the event a successful trigger roll produces.
pub fn create_event(kind: MarketEventKind, system_id: SystemId, day: u32) -> MarketEvent {
    let def = definition(kind);
    let id = event_id(kind, system_id, day);

    let drawn = SeededRng::new(&format!("duration_{id}")).next_int(
        i64::from(def.min_duration),
        i64::from(def.max_duration),
    );
    let duration = u32::try_from(drawn).unwrap_or(def.min_duration);

    let modifiers = if kind == MarketEventKind::SupplyGlut {
        let mut rng = SeededRng::new(&format!("commodity_{id}"));
        rng.next_index(Commodity::ALL.len())
            .and_then(|i| Commodity::ALL.get(i).copied())
            .map(|commodity| BTreeMap::from([(commodity, GLUT_FACTOR)]))
            .unwrap_or_default()
    } else {
        static_modifiers(kind)
    };

    MarketEvent {
        id,
        kind,
        system_id,
        start_day: day,
        end_day: day.saturating_add(duration),
        modifiers,
    }
}

/// Events removed and created by one daily update.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct EventUpdate {
    /// Events whose last day had passed.
    pub expired: Vec<MarketEvent>,
    /// Events triggered today.
    pub created: Vec<MarketEvent>,
}

/// Remove every event whose `end_day` is before `current_day`.
pub fn expire_events(events: &mut Vec<MarketEvent>, current_day: u32) -> Vec<MarketEvent> {
    let (expired, kept): (Vec<_>, Vec<_>) = events
        .drain(..)
        .partition(|e| e.end_day < current_day);
    *events = kept;
    for event in &expired {
        debug!(id = %event.id, end_day = event.end_day, current_day, "Market event expired");
    }
    expired
}

/// Roll every kind against every eligible, event-free system.
///
/// Kinds are rolled in registry order and systems in catalog order. A system
/// that receives an event is skipped by later kinds, so each system holds at
/// most one event.
pub fn trigger_events(
    events: &mut Vec<MarketEvent>,
    systems: &[StarSystem],
    current_day: u32,
) -> Vec<MarketEvent> {
    let mut created = Vec::new();
    for kind in MarketEventKind::ALL {
        let rule = definition(kind).rule;
        for system in systems {
            if events.iter().any(|e| e.system_id == system.id) {
                continue;
            }
            if !is_eligible(rule, system) {
                continue;
            }
            if !rolls_trigger(kind, system.id, current_day) {
                continue;
            }
            let event = create_event(kind, system.id, current_day);
            debug!(
                id = %event.id,
                system = %system.name,
                end_day = event.end_day,
                "Market event created"
            );
            events.push(event.clone());
            created.push(event);
        }
    }
    created
}

/// Run the daily update: expiry first, then trigger rolls.
pub fn update_events(
    events: &mut Vec<MarketEvent>,
    systems: &[StarSystem],
    current_day: u32,
) -> EventUpdate {
    let expired = expire_events(events, current_day);
    let created = trigger_events(events, systems, current_day);
    info!(
        current_day,
        expired = expired.len(),
        created = created.len(),
        active = events.len(),
        "Market events updated"
    );
    EventUpdate { expired, created }
}
