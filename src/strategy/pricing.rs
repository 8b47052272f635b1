//! Pricing model.
//!
//! Weekly price tables, optimal selling days, and the expected-profit
//! estimate used to rank candidates during exploration.

use chrono::Weekday;

use crate::types::FruitType;

// ---------------------------------------------------------------------------
// Price tables
// ---------------------------------------------------------------------------

/// Days indexed by `day % 7`. Day 0 is a Monday.
pub const WEEK: [Weekday; 7] = [
    Weekday::Mon,
    Weekday::Tue,
    Weekday::Wed,
    Weekday::Thu,
    Weekday::Fri,
    Weekday::Sat,
    Weekday::Sun,
];

/// Apple price per kg, Monday first. Tue/Wed pay 4.
pub const APPLE_PRICES: [f64; 7] = [1.0, 4.0, 4.0, 1.0, 1.0, 1.0, 1.0];
/// Berry price per kg, Monday first. Weekends pay 5.
pub const BERRY_PRICES: [f64; 7] = [3.0, 3.0, 3.0, 3.0, 3.0, 5.0, 5.0];

/// Average apple price used when estimating candidate profit.
pub const APPLE_AVERAGE_PRICE: f64 = 2.0;
/// Average berry price: five days at 3, two at 5.
pub const BERRY_AVERAGE_PRICE: f64 = (5.0 * 3.0 + 2.0 * 5.0) / 7.0;

/// Chance that a given day is rainy.
pub const RAIN_PROBABILITY: f64 = 0.4;
/// Berry yield multiplier on rainy days.
pub const RAIN_YIELD_FACTOR: f64 = 0.5;

pub fn weekday_index(day: u32) -> usize {
    (day % 7) as usize
}

pub fn weekday_of(day: u32) -> Weekday {
    WEEK[weekday_index(day)]
}

pub fn price_table(fruit: FruitType) -> &'static [f64; 7] {
    match fruit {
        FruitType::Apples => &APPLE_PRICES,
        FruitType::Berries => &BERRY_PRICES,
    }
}

/// Market price per kg of `fruit` on `day`.
pub fn price_on(fruit: FruitType, day: u32) -> f64 {
    price_table(fruit)[weekday_index(day)]
}

pub fn average_price(fruit: FruitType) -> f64 {
    match fruit {
        FruitType::Apples => APPLE_AVERAGE_PRICE,
        FruitType::Berries => BERRY_AVERAGE_PRICE,
    }
}

/// Weekday indices on which `fruit` fetches its best price.
pub fn optimal_days(fruit: FruitType) -> Vec<usize> {
    let table = price_table(fruit);
    let best = table.iter().copied().fold(f64::MIN, f64::max);
    table
        .iter()
        .enumerate()
        .filter(|(_, p)| **p >= best)
        .map(|(i, _)| i)
        .collect()
}

pub fn is_optimal_day(fruit: FruitType, day: u32) -> bool {
    optimal_days(fruit).contains(&weekday_index(day))
}

// ---------------------------------------------------------------------------
// Profit estimate
// ---------------------------------------------------------------------------

/// Expected daily yield given a sampled mean.
///
/// Bush yields are halved on rainy days, so berries are discounted by the
/// rain probability. Trees are unaffected.
pub fn expected_yield(sampled_yield: f64, fruit: FruitType) -> f64 {
    match fruit {
        FruitType::Berries => {
            (1.0 - RAIN_PROBABILITY) * sampled_yield
                + RAIN_PROBABILITY * (sampled_yield * RAIN_YIELD_FACTOR)
        }
        FruitType::Apples => sampled_yield,
    }
}

/// Returns `(expected_profit, expected_yield)` per day for a source whose
/// sampled mean yield is `sampled_yield`.
pub fn expected_profit_per_day(sampled_yield: f64, fruit: FruitType) -> (f64, f64) {
    let avg_yield = expected_yield(sampled_yield, fruit);
    (avg_yield * average_price(fruit), avg_yield)
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
