use serde::{Deserialize, Serialize};

/// One of the two seats in a battle. `First` is the fighter passed first to
/// the driver.
#[derive(Serialize, Deserialize, Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Side {
    First,
    Second,
}

impl Side {
    pub fn index(self) -> usize {
        match self {
            Side::First => 0,
            Side::Second => 1,
        }
    }

    pub fn opponent(self) -> Side {
        match self {
            Side::First => Side::Second,
            Side::Second => Side::First,
        }
    }
}

/// Time that passes between two actions of a combatant with the given speed.
pub fn time_increment(speed: i32) -> f64 {
    100.0 / (speed as f64).max(1.0)
}

/// Speed-driven turn order.
///
/// Each side owns a "next action time" accumulator. The side with the smaller
/// accumulator acts next; on a tie `Side::First` acts. After acting, only the
/// actor's accumulator moves forward, by its own fixed increment.
#[derive(Debug, Clone, PartialEq)]
pub struct TurnScheduler {
    next_action: [f64; 2],
    increment: [f64; 2],
}

impl TurnScheduler {
    pub fn new(first_speed: i32, second_speed: i32) -> Self {
        Self {
            next_action: [0.0, 0.0],
            increment: [time_increment(first_speed), time_increment(second_speed)],
        }
    }

    /// The side due to act, with the time it acts at.
    pub fn next_actor(&self) -> (Side, f64) {
        if self.next_action[0] <= self.next_action[1] {
            (Side::First, self.next_action[0])
        } else {
            (Side::Second, self.next_action[1])
        }
    }

    pub fn advance(&mut self, side: Side) {
        self.next_action[side.index()] += self.increment[side.index()];
    }

    pub fn next_action_time(&self, side: Side) -> f64 {
        self.next_action[side.index()]
    }

    pub fn increment(&self, side: Side) -> f64 {
        self.increment[side.index()]
    }
}
