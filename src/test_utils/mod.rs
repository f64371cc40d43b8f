pub mod naive_solver;

use crate::network::PlaceTable;

/// Initialize env_logger for tests. Safe to call multiple times.
pub fn init_logger() {
    let _ = env_logger::Builder::from_default_env()
        .filter_level(log::LevelFilter::Trace)
        .is_test(true)
        .try_init();
}

/// Load a `.bnet` model given as a string. Panics on invalid input.
pub fn mk_places(model: &str) -> PlaceTable {
    PlaceTable::try_from_bnet(model).unwrap_or_else(|e| panic!("Invalid test model: {}", e))
}

/// Count fixed points of `places` by checking every state of the network.
///
/// At the moment, this only supports up to 20 variables.
pub fn count_fixed_points_naive(places: &PlaceTable) -> usize {
    let variables = places.variables().collect::<Vec<_>>();
    assert!(variables.len() <= 20);
    let mut count = 0;
    for state in 0u32..(1u32 << variables.len()) {
        let value_of = |name: &str| {
            let position = variables
                .iter()
                .position(|it| *it == name)
                .unwrap_or_else(|| panic!("Unknown variable `{}`.", name));
            (state >> position) & 1 == 1
        };
        let is_fixed = variables.iter().all(|var| {
            let place = places.find_place(var, false).unwrap();
            place.function().evaluate(&value_of) == value_of(var)
        });
        if is_fixed {
            count += 1;
        }
    }
    count
}
