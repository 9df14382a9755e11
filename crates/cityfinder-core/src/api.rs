// crates/cityfinder-core/src/api.rs

//! Serializable views for presentation layers (CLI JSON output, grouped
//! listings with a letter header per group).

use serde::Serialize;

use crate::model::City;

/// Flat JSON view of a city.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct CityView<'a> {
    pub name: &'a str,
    pub country_code: &'a str,
    pub latitude: f64,
    pub longitude: f64,
}

impl<'a> From<&'a City> for CityView<'a> {
    fn from(c: &'a City) -> Self {
        CityView {
            name: &c.name,
            country_code: &c.country_code,
            latitude: c.latitude,
            longitude: c.longitude,
        }
    }
}

/// A run of consecutive cities sharing an initial letter.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct CityGroup<'a> {
    pub letter: char,
    pub cities: Vec<CityView<'a>>,
}

/// Header letter for a name: its uppercased first character, `'#'` when
/// the name is empty.
pub fn initial_of(name: &str) -> char {
    name.chars()
        .next()
        .and_then(|c| c.to_uppercase().next())
        .unwrap_or('#')
}

/// Groups consecutive cities by [`initial_of`] their name.
///
/// The input is not re-sorted. Sorted input (the bundled dataset, or any
/// prefix search over it) gives one group per letter; unsorted input may
/// repeat a letter in separate groups.
pub fn group_by_initial<'a, I>(cities: I) -> Vec<CityGroup<'a>>
where
    I: IntoIterator<Item = &'a City>,
{
    let mut groups: Vec<CityGroup<'a>> = Vec::new();
    for city in cities {
        let letter = initial_of(&city.name);
        match groups.last_mut() {
            Some(group) if group.letter == letter => group.cities.push(city.into()),
            _ => groups.push(CityGroup {
                letter,
                cities: vec![city.into()],
            }),
        }
    }
    groups
}
