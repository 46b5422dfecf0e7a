use holdem_engine::errors::GameError;
use holdem_engine::seat::{Action, SeatId};
use holdem_engine::table::{Table, TableConfig};
use holdem_engine::view::{ActionContext, NullRenderer, ScriptedProvider};

fn config(seed: u64) -> TableConfig {
    TableConfig {
        seed: Some(seed),
        small_blind: 10,
        ..TableConfig::default()
    }
}

#[test]
fn short_all_in_only_wins_what_it_covered() {
    // Seat 0 shoves 100 from the small blind; both deep stacks call.
    let mut table = Table::new(config(3), Box::new(NullRenderer)).unwrap();
    table
        .add_seat(SeatId(0), "short", 100, Box::new(ScriptedProvider::new([Action::AllIn])))
        .unwrap();
    for id in [1, 2] {
        table
            .add_seat(SeatId(id), format!("deep{id}"), 1000, Box::new(ScriptedProvider::new([])))
            .unwrap();
    }
    let before = table.total_chips();
    table.pre_flop().unwrap();
    table.flop().unwrap();
    table.turn().unwrap();
    table.river().unwrap();
    let settlement = table.showdown().unwrap();
    assert_eq!(settlement.total_paid(), 300);
    assert!(settlement.refunds.is_empty());
    table.reset().unwrap();
    assert_eq!(table.total_chips(), before);
}

#[test]
fn everyone_folding_to_big_blind_pays_the_big_blind() {
    let mut table = Table::new(config(11), Box::new(NullRenderer)).unwrap();
    // Seat 0 posts small blind, seat 1 big blind, seat 2 acts first.
    table
        .add_seat(SeatId(0), "sb", 500, Box::new(ScriptedProvider::new([Action::Fold])))
        .unwrap();
    table
        .add_seat(SeatId(1), "bb", 500, Box::new(ScriptedProvider::new([])))
        .unwrap();
    table
        .add_seat(SeatId(2), "utg", 500, Box::new(ScriptedProvider::new([Action::Fold])))
        .unwrap();
    table.pre_flop().unwrap();
    table.flop().unwrap();
    table.turn().unwrap();
    table.river().unwrap();
    let settlement = table.showdown().unwrap();
    assert_eq!(settlement.paid_to(SeatId(1)), 30);
    assert_eq!(table.seat(SeatId(1)).unwrap().stack(), 510);
    assert_eq!(table.seat(SeatId(0)).unwrap().stack(), 490);
}

#[test]
fn fatal_provider_error_aborts_the_hand() {
    let mut table = Table::new(config(5), Box::new(NullRenderer)).unwrap();
    table
        .add_seat(SeatId(0), "a", 500, Box::new(ScriptedProvider::new([])))
        .unwrap();
    table
        .add_seat(SeatId(1), "b", 500, Box::new(ScriptedProvider::new([])))
        .unwrap();
    let broken = |_: &ActionContext| -> Result<Action, GameError> { Err(GameError::DeckExhausted) };
    table.add_seat(SeatId(2), "c", 500, Box::new(broken)).unwrap();
    assert_eq!(table.pre_flop().unwrap_err(), GameError::DeckExhausted);
}
