//! Terminal seat: a stdin-backed action provider for the human and a
//! renderer that prints the table to stdout.
//!
//! The renderer and the command handler share one [`Console`], so the
//! handler can keep printing between hands while the table owns the
//! renderer.

use std::cell::{Cell, RefCell};
use std::io::{self, BufRead, Write};
use std::rc::Rc;

use holdem_engine::cards::Card;
use holdem_engine::errors::GameError;
use holdem_engine::game::Street;
use holdem_engine::seat::{Action, SeatId};
use holdem_engine::view::{ActionContext, ActionProvider, ShowdownView, ViewRenderer};

use crate::formatters::{format_board, format_card, format_seat, winnings};
use crate::io_utils::read_stdin_line;
use crate::ui;
use crate::validation::{ParseResult, parse_player_action};

/// stdout/stderr pair plus the first write failure, which the handler
/// collects once a hand is over.
pub struct Console<'w> {
    out: &'w mut dyn Write,
    err: &'w mut dyn Write,
    failure: Option<io::Error>,
}

impl<'w> Console<'w> {
    pub fn shared(out: &'w mut dyn Write, err: &'w mut dyn Write) -> Rc<RefCell<Console<'w>>> {
        Rc::new(RefCell::new(Console {
            out,
            err,
            failure: None,
        }))
    }

    fn record(&mut self, result: io::Result<()>) {
        if let Err(e) = result {
            if self.failure.is_none() {
                self.failure = Some(e);
            }
        }
    }
}

/// Prints streets, the human's view before each of its decisions, and the
/// showdown. Bot decisions are not shown as they happen.
#[derive(Clone)]
pub struct TerminalRenderer<'w> {
    console: Rc<RefCell<Console<'w>>>,
    human: Option<SeatId>,
}

impl<'w> TerminalRenderer<'w> {
    pub fn new(console: Rc<RefCell<Console<'w>>>, human: Option<SeatId>) -> Self {
        Self { console, human }
    }

    pub fn say(&self, line: &str) -> io::Result<()> {
        let mut console = self.console.borrow_mut();
        writeln!(console.out, "{}", line)
    }

    /// First write error hit while rendering, if any.
    pub fn take_error(&self) -> io::Result<()> {
        match self.console.borrow_mut().failure.take() {
            Some(e) => Err(e),
            None => Ok(()),
        }
    }

    fn is_human(&self, seat: SeatId) -> bool {
        self.human == Some(seat)
    }

    fn write_view(out: &mut dyn Write, ctx: &ActionContext) -> io::Result<()> {
        writeln!(out)?;
        writeln!(
            out,
            "{} | board {} | pot {}",
            ctx.street,
            format_board(&ctx.board),
            ctx.pot()
        )?;
        for seat in &ctx.seats {
            let marker = if seat.id == ctx.seat { ">" } else { " " };
            writeln!(out, "{} {}", marker, format_seat(seat))?;
        }
        if let Some([a, b]) = ctx.hole_cards {
            writeln!(out, "Your cards: {} {}", format_card(&a), format_card(&b))?;
        }
        let to_call = ctx.to_call();
        if to_call == 0 {
            write!(out, "Action (c=check, r N=bet, a=all-in, f=fold, q=quit): ")?;
        } else {
            write!(
                out,
                "To call {} (c=call, r N=raise, a=all-in, f=fold, q=quit): ",
                to_call.min(ctx.stack)
            )?;
        }
        out.flush()
    }

    fn write_showdown(out: &mut dyn Write, view: &ShowdownView) -> io::Result<()> {
        writeln!(out)?;
        writeln!(out, "Showdown | board {}", format_board(&view.board))?;
        for seat in &view.seats {
            match (seat.hole_cards, &seat.combination) {
                (Some([a, b]), Some(combination)) => writeln!(
                    out,
                    "  {:<10} {} {}  {}",
                    seat.seat.name,
                    format_card(&a),
                    format_card(&b),
                    combination
                )?,
                _ => writeln!(out, "  {:<10} folded", seat.seat.name)?,
            }
        }
        for (id, amount) in winnings(&view.awards) {
            let name = view
                .seats
                .iter()
                .find(|s| s.seat.id == id)
                .map(|s| s.seat.name.as_str())
                .unwrap_or("?");
            writeln!(out, "{} wins {}", name, amount)?;
        }
        for id in &view.eliminated {
            if let Some(seat) = view.seats.iter().find(|s| s.seat.id == *id) {
                writeln!(out, "{} is out of chips", seat.seat.name)?;
            }
        }
        Ok(())
    }
}

impl ViewRenderer for TerminalRenderer<'_> {
    fn street_dealt(&mut self, street: Street, board: &[Card]) {
        let mut console = self.console.borrow_mut();
        let result = writeln!(console.out, "--- {} {} ---", street, format_board(board));
        console.record(result);
    }

    fn before_action(&mut self, ctx: &ActionContext) {
        if !self.is_human(ctx.seat) {
            return;
        }
        let mut console = self.console.borrow_mut();
        let result = Self::write_view(console.out, ctx);
        console.record(result);
    }

    fn rejected(&mut self, seat: SeatId, error: &GameError) {
        if !self.is_human(seat) {
            return;
        }
        let mut console = self.console.borrow_mut();
        let result = ui::write_error(console.err, &error.to_string());
        console.record(result);
    }

    fn showdown(&mut self, view: &ShowdownView) {
        let mut console = self.console.borrow_mut();
        let result = Self::write_showdown(console.out, view);
        console.record(result);
    }
}

/// Reads the human's actions from a line-oriented input.
///
/// `q`, `quit` and end of input fold the seat for the rest of the hand and
/// raise the shared quit flag.
pub struct TerminalProvider<'i> {
    input: &'i mut dyn BufRead,
    quit: Rc<Cell<bool>>,
}

impl<'i> TerminalProvider<'i> {
    pub fn new(input: &'i mut dyn BufRead, quit: Rc<Cell<bool>>) -> Self {
        Self { input, quit }
    }
}

impl ActionProvider for TerminalProvider<'_> {
    fn request_action(&mut self, _ctx: &ActionContext) -> Result<Action, GameError> {
        if self.quit.get() {
            return Ok(Action::Fold);
        }
        let Some(line) = read_stdin_line(self.input) else {
            self.quit.set(true);
            return Ok(Action::Fold);
        };
        match parse_player_action(&line) {
            ParseResult::Action(action) => Ok(action),
            ParseResult::Quit => {
                self.quit.set(true);
                Ok(Action::Fold)
            }
            ParseResult::Invalid(msg) => Err(GameError::UnrecognizedAction(msg)),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Cursor;

    fn ctx() -> ActionContext {
        ActionContext {
            street: Street::Preflop,
            board: Vec::new(),
            seat: SeatId(0),
            hole_cards: None,
            stack: 100,
            committed: 0,
            table_high: 20,
            big_blind: 20,
            seats: Vec::new(),
            attempt: 1,
        }
    }

    #[test]
    fn provider_parses_and_reports_invalid_input() {
        let mut input = Cursor::new("zzz\nr 40\n");
        let quit = Rc::new(Cell::new(false));
        let mut provider = TerminalProvider::new(&mut input, quit.clone());
        assert!(matches!(
            provider.request_action(&ctx()),
            Err(GameError::UnrecognizedAction(_))
        ));
        assert_eq!(provider.request_action(&ctx()).unwrap(), Action::RaiseBy(40));
        assert!(!quit.get());
    }

    #[test]
    fn eof_and_quit_fold_and_raise_flag() {
        let mut input = Cursor::new("q\nc\n");
        let quit = Rc::new(Cell::new(false));
        let mut provider = TerminalProvider::new(&mut input, quit.clone());
        assert_eq!(provider.request_action(&ctx()).unwrap(), Action::Fold);
        assert!(quit.get());
        // Remaining input is ignored once quit is requested.
        assert_eq!(provider.request_action(&ctx()).unwrap(), Action::Fold);

        let mut empty = Cursor::new("");
        let quit = Rc::new(Cell::new(false));
        let mut provider = TerminalProvider::new(&mut empty, quit.clone());
        assert_eq!(provider.request_action(&ctx()).unwrap(), Action::Fold);
        assert!(quit.get());
    }

    #[test]
    fn renderer_prompts_only_the_human() {
        let mut out = Vec::new();
        let mut err = Vec::new();
        {
            let console = Console::shared(&mut out, &mut err);
            let mut renderer = TerminalRenderer::new(console, Some(SeatId(0)));
            renderer.before_action(&ctx());
            let mut bot = ctx();
            bot.seat = SeatId(1);
            renderer.before_action(&bot);
            renderer.rejected(SeatId(0), &GameError::UnrecognizedAction("nope".into()));
            renderer.take_error().unwrap();
        }
        let out = String::from_utf8(out).unwrap();
        assert_eq!(out.matches("To call 20").count(), 1);
        assert!(String::from_utf8(err).unwrap().contains("Error: Unrecognized action: nope"));
    }
}
