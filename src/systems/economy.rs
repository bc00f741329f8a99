//! Upgrades, their prices, and the weapon stats they produce.

use bevy_ecs::resource::Resource;
use smallvec::SmallVec;
use strum::{EnumCount, IntoEnumIterator};
use strum_macros::{EnumCount, EnumIter, IntoStaticStr};
use tracing::debug;

use crate::constants::weapon;

/// Every purchasable upgrade.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, EnumCount, EnumIter, IntoStaticStr)]
pub enum Upgrade {
    FireRate,
    Damage,
    BoltSpeed,
    MoveSpeed,
    Spread,
    Pierce,
    RingBlast,
}

/// Pricing and presentation of one upgrade.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct UpgradeInfo {
    pub name: &'static str,
    pub description: &'static str,
    pub max_level: u32,
    pub base_cost: u32,
    pub cost_scale: f64,
}

impl Upgrade {
    pub const fn info(self) -> UpgradeInfo {
        let (name, description, max_level, base_cost, cost_scale) = match self {
            Upgrade::FireRate => ("Fire Rate", "Increase shots per second.", 10, 18, 1.38),
            Upgrade::Damage => ("Damage", "Bolts deal more damage.", 12, 20, 1.40),
            Upgrade::BoltSpeed => ("Bolt Speed", "Bolts fly faster.", 10, 14, 1.34),
            Upgrade::MoveSpeed => ("Move Speed", "Move faster.", 8, 14, 1.34),
            Upgrade::Spread => ("Spread", "Fire extra bolts in a cone.", 6, 35, 1.50),
            Upgrade::Pierce => ("Pierce", "Bolts pass through enemies.", 6, 38, 1.50),
            Upgrade::RingBlast => ("Ring Blast", "Periodically fire a ring of bolts.", 5, 45, 1.55),
        };
        UpgradeInfo {
            name,
            description,
            max_level,
            base_cost,
            cost_scale,
        }
    }

    pub fn max_level(self) -> u32 {
        self.info().max_level
    }

    /// Price of buying the level after `level`: `floor(base * scale^level)`.
    pub fn cost_at(self, level: u32) -> u64 {
        let info = self.info();
        (info.base_cost as f64 * info.cost_scale.powi(level as i32)).floor() as u64
    }
}

/// Current level of every upgrade. Reset at the start of each run.
#[derive(Resource, Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct UpgradeLevels([u32; Upgrade::COUNT]);

impl UpgradeLevels {
    pub fn level(&self, upgrade: Upgrade) -> u32 {
        self.0[upgrade as usize]
    }

    pub fn is_maxed(&self, upgrade: Upgrade) -> bool {
        self.level(upgrade) >= upgrade.max_level()
    }

    pub fn next_cost(&self, upgrade: Upgrade) -> u64 {
        upgrade.cost_at(self.level(upgrade))
    }

    /// Sets a level directly, capped at the upgrade's maximum.
    pub fn set(&mut self, upgrade: Upgrade, level: u32) {
        self.0[upgrade as usize] = level.min(upgrade.max_level());
    }

    pub fn reset(&mut self) {
        *self = Self::default();
    }

    /// Tries to buy one level of `upgrade` out of `points`.
    ///
    /// Maxed and unaffordable upgrades leave both the levels and the points untouched.
    pub fn purchase(&mut self, upgrade: Upgrade, points: &mut u64) -> PurchaseOutcome {
        if self.is_maxed(upgrade) {
            return PurchaseOutcome::Maxed;
        }
        let cost = self.next_cost(upgrade);
        if *points < cost {
            return PurchaseOutcome::Unaffordable { cost };
        }

        *points -= cost;
        self.0[upgrade as usize] += 1;
        debug!(
            upgrade = <&'static str>::from(upgrade),
            level = self.level(upgrade),
            cost,
            "Upgrade purchased"
        );
        PurchaseOutcome::Purchased { cost }
    }

    /// The weapon and movement stats these levels produce.
    pub fn effective(&self) -> EffectiveStats {
        let level = |upgrade| self.level(upgrade) as f32;
        EffectiveStats {
            fire_rate: weapon::BASE_FIRE_RATE + level(Upgrade::FireRate) * weapon::FIRE_RATE_PER_LEVEL,
            damage: weapon::BASE_DAMAGE + level(Upgrade::Damage) * weapon::DAMAGE_PER_LEVEL,
            bolt_speed: weapon::BASE_BOLT_SPEED + level(Upgrade::BoltSpeed) * weapon::BOLT_SPEED_PER_LEVEL,
            move_speed: weapon::BASE_MOVE_SPEED + level(Upgrade::MoveSpeed) * weapon::MOVE_SPEED_PER_LEVEL,
            spread: self.level(Upgrade::Spread),
            pierce: self.level(Upgrade::Pierce),
            ring_blast: self.level(Upgrade::RingBlast),
        }
    }
}

/// Stats derived from the upgrade levels.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct EffectiveStats {
    /// Shots per second.
    pub fire_rate: f32,
    pub damage: f32,
    pub bolt_speed: f32,
    pub move_speed: f32,
    /// Extra bolts per shot.
    pub spread: u32,
    pub pierce: u32,
    pub ring_blast: u32,
}

/// The result of a purchase attempt. Failed attempts change nothing.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PurchaseOutcome {
    Purchased { cost: u64 },
    Maxed,
    Unaffordable { cost: u64 },
    /// The shop is closed or the index does not name an offer.
    Unavailable,
}

impl PurchaseOutcome {
    pub fn succeeded(&self) -> bool {
        matches!(self, PurchaseOutcome::Purchased { .. })
    }
}

/// The upgrades offered in the shop, in display order.
#[derive(Resource, Debug, Clone, PartialEq)]
pub struct ShopCatalog {
    pub offers: SmallVec<[Upgrade; Upgrade::COUNT]>,
}

impl ShopCatalog {
    /// The full catalog. The ring blast is only offered when the ability is enabled.
    pub fn new(ring_blast: bool) -> Self {
        Self {
            offers: Upgrade::iter()
                .filter(|upgrade| ring_blast || *upgrade != Upgrade::RingBlast)
                .collect(),
        }
    }

    pub fn get(&self, index: usize) -> Option<Upgrade> {
        self.offers.get(index).copied()
    }
}

/// One line of the shop listing, ready for presentation.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ShopEntry {
    pub upgrade: Upgrade,
    pub name: &'static str,
    pub description: &'static str,
    pub level: u32,
    pub max_level: u32,
    /// `None` once the upgrade is maxed.
    pub cost: Option<u64>,
    pub affordable: bool,
}

impl ShopCatalog {
    pub fn entries(&self, levels: &UpgradeLevels, points: u64) -> Vec<ShopEntry> {
        self.offers
            .iter()
            .map(|&upgrade| {
                let info = upgrade.info();
                let cost = (!levels.is_maxed(upgrade)).then(|| levels.next_cost(upgrade));
                ShopEntry {
                    upgrade,
                    name: info.name,
                    description: info.description,
                    level: levels.level(upgrade),
                    max_level: info.max_level,
                    cost,
                    affordable: cost.is_some_and(|cost| points >= cost),
                }
            })
            .collect()
    }
}
