#[cfg(test)]
pub mod common;

#[cfg(test)]
mod test_deterministic_damage;

#[cfg(test)]
mod test_exhaustion;


#[cfg(test)]
mod test_turn_order;
