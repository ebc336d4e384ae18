use log::{debug, error, info, log_enabled, Level};
use wasm_bindgen::prelude::*;

pub mod battle;
pub mod error;
pub mod fleet;
pub mod interface;
pub mod production;
mod utils;

use crate::battle::{BattleReport, Dice, FleetBattle, SeededDice, Side};
use crate::error::CombatError;
use crate::interface::{BattleRequest, BattleResponse, OutcomeTally};

static INIT: std::sync::Once = std::sync::Once::new();

fn initialize() {
    INIT.call_once(|| {
        utils::set_panic_hook();
        wasm_logger::init(wasm_logger::Config::default()); // ロガー初期化
        info!("Logger initialized");
    });
}

/// Resolve one battle. Takes a `BattleRequest`, returns a `BattleResponse`.
#[wasm_bindgen]
pub fn simulate_battle(request: JsValue) -> Result<JsValue, JsValue> {
    initialize();

    let run = || -> error::Result<JsValue> {
        let request = serde_wasm_bindgen::from_value::<BattleRequest>(request)?;
        let response = resolve_battle(request)?;
        Ok(serde_wasm_bindgen::to_value(&response)?)
    };
    run().map_err(to_js_error)
}

/// Run the same battle `count` times on copies of the fleets and tally the outcomes.
#[wasm_bindgen]
pub fn estimate_battle(request: JsValue, count: u32) -> Result<JsValue, JsValue> {
    initialize();

    let run = || -> error::Result<JsValue> {
        let request = serde_wasm_bindgen::from_value::<BattleRequest>(request)?;
        let tally = estimate_outcomes(request, count)?;
        Ok(serde_wasm_bindgen::to_value(&tally)?)
    };
    run().map_err(to_js_error)
}

fn to_js_error(err: CombatError) -> JsValue {
    error!("Battle simulation failed: {}", err);
    JsValue::from_str(&err.to_string())
}

/// Validate both fleets, fight, and report. Empty fleets are rejected
/// before any round is fought.
pub fn resolve_battle(request: BattleRequest) -> error::Result<BattleResponse> {
    let BattleRequest {
        mut first,
        mut second,
        config,
        seed,
    } = validated(request)?;

    let mut dice = seed.map_or_else(SeededDice::from_entropy, SeededDice::new);
    let before = BattleReport::snapshot(&first, &second);

    info!("Battle started");
    let resolution = {
        let mut battle = FleetBattle::new(&mut first, &mut second, &mut dice, &config);
        let resolution = battle.run();
        battle.flush_logs_debug();
        resolution?
    };

    let report = BattleReport::new(before, resolution, BattleReport::snapshot(&first, &second));
    if log_enabled!(Level::Debug) {
        match serde_json::to_string(&report) {
            Ok(json) => debug!("Battle report: {json}"),
            Err(err) => error!("Failed to serialize battle report: {:?}", err),
        }
    }

    Ok(BattleResponse {
        report,
        first,
        second,
    })
}

pub fn estimate_outcomes(request: BattleRequest, count: u32) -> error::Result<OutcomeTally> {
    let BattleRequest {
        first,
        second,
        config,
        seed,
    } = validated(request)?;

    let mut dice = seed.map_or_else(SeededDice::from_entropy, SeededDice::new);
    let mut tally = OutcomeTally::default();

    for i in 0..count {
        let logging = config.logging && (i < 10 || i % 100 == 0);
        let config = battle::BattleConfig {
            logging,
            ..config.clone()
        };
        let winner = battle_once(&first, &second, &mut dice, &config)?;
        match winner {
            Some(Side::First) => tally.first_wins += 1,
            Some(Side::Second) => tally.second_wins += 1,
            None => tally.no_contest += 1,
        }
    }
    debug!("Outcome tally over {count} battles: {:?}", tally);
    Ok(tally)
}

/// Repair both fleets in place; either one ending up empty rejects the request.
fn validated(mut request: BattleRequest) -> error::Result<BattleRequest> {
    let first_valid = request.first.validate();
    let second_valid = request.second.validate();
    if !(first_valid && second_valid) {
        return Err(CombatError::EmptyFleet);
    }
    Ok(request)
}

fn battle_once<D: Dice + ?Sized>(
    first: &fleet::Fleet,
    second: &fleet::Fleet,
    dice: &mut D,
    config: &battle::BattleConfig,
) -> error::Result<Option<Side>> {
    let mut first = first.clone();
    let mut second = second.clone();
    let mut battle = FleetBattle::new(&mut first, &mut second, dice, config);

    let resolution = battle.run();
    battle.flush_logs_debug();

    resolution.map(|r| r.winner)
}
