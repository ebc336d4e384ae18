/// フロントエンドとシミュレーションコア間のインターフェースを定義する。
/// このモジュールで定義される構造体は、シリアライズ/デシリアライズ可能でなければならない。
/// また、それらのメソッドは単なるゲッターに限定し、原則的にロジックを含めてはならない。
use serde::{Deserialize, Serialize};

pub use crate::battle::{BattleConfig, BattleReport, FleetSnapshot, ShipSnapshot, Side};
pub use crate::fleet::{Fleet, FleetPosition, HexId, Owner, StarshipType};

/// Two fleets that met on the map.
#[derive(Serialize, Deserialize, Debug, Clone)]
#[serde(rename_all = "camelCase")]
pub struct BattleRequest {
    pub first: Fleet,
    pub second: Fleet,
    #[serde(default)]
    pub config: BattleConfig,
    /// Fixed seed for replays. Drawn from the thread RNG when absent.
    #[serde(default)]
    pub seed: Option<u64>,
}

/// The report plus both fleets as they left the battle.
#[derive(Serialize, Deserialize, Debug, Clone)]
#[serde(rename_all = "camelCase")]
pub struct BattleResponse {
    pub report: BattleReport,
    pub first: Fleet,
    pub second: Fleet,
}

/// How often each outcome came up over repeated runs of the same battle.
#[derive(Serialize, Deserialize, Debug, Clone, Copy, Default, PartialEq, Eq)]
#[serde(rename_all = "camelCase")]
pub struct OutcomeTally {
    pub first_wins: u32,
    pub second_wins: u32,
    pub no_contest: u32,
}

impl OutcomeTally {
    pub fn total(&self) -> u32 {
        self.first_wins + self.second_wins + self.no_contest
    }

    pub fn first_win_rate(&self) -> f64 {
        if self.total() == 0 {
            return 0.0;
        }
        self.first_wins as f64 / self.total() as f64
    }
}
