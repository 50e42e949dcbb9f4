// Round planner shared by the unit tests (through `test_gens`) and the
// integration tests (through `tests/common`). The including module brings
// `GameSession`, `SeatAction` and `MIN_ACTIVE_PLAYERS` into scope.

struct Dice<'a> {
    values: &'a [u32],
    next: usize,
}

impl<'a> Dice<'a> {
    fn new(values: &'a [u32]) -> Self {
        Self { values, next: 0 }
    }

    fn roll(&mut self, sides: u32) -> u32 {
        let v = self.values.get(self.next).copied().unwrap_or(0);
        self.next += 1;
        v % sides.max(1)
    }
}

/// Build a valid `(actions, tricks)` pair for the session's current round.
pub fn plan_round(session: &GameSession, dice: &[u32]) -> (Vec<SeatAction>, Vec<u8>) {
    let mut dice = Dice::new(dice);
    let n = session.num_players();
    let cards = session.current_card_count().expect("round in progress");

    let mut actions = Vec::with_capacity(n as usize);
    let mut abandoned = 0u8;
    let mut reversal_taken = false;
    for seat in 0..n {
        let options = session.seat_options(seat).expect("seat exists");
        let bid = dice.roll(u32::from(cards) + 1) as u8;
        let may_sit_out = n - abandoned > MIN_ACTIVE_PLAYERS;
        let action = match dice.roll(8) {
            0 | 1 if options.can_abandon && may_sit_out => SeatAction::Abandon,
            2 if options.can_reverse && !reversal_taken => SeatAction::Reverse(bid),
            3 if options.can_reverse_and_abandon && !reversal_taken && may_sit_out => {
                SeatAction::ReverseAndAbandon
            }
            _ => SeatAction::Play(bid),
        };
        if action.is_abandon() {
            abandoned += 1;
        }
        if action.reversal_cost().is_some() {
            reversal_taken = true;
        }
        actions.push(action);
    }

    let active: Vec<usize> = actions
        .iter()
        .enumerate()
        .filter(|(_, a)| !a.is_abandon())
        .map(|(seat, _)| seat)
        .collect();
    let mut tricks = vec![0u8; n as usize];
    for _ in 0..cards {
        let pick = active[dice.roll(active.len() as u32) as usize];
        tricks[pick] += 1;
    }

    (actions, tricks)
}
