use chrono::NaiveDate;
use serde::{Deserialize, Deserializer, Serialize, Serializer};
use std::collections::BTreeSet;
use std::fmt;

/// A value picked from a fixed list of options. `token` is what travels over
/// the wire and in form posts, `label` is what the visitor reads.
pub trait Choice: Sized + Copy + PartialEq + 'static {
    const ALL: &'static [Self];

    fn token(&self) -> &'static str;

    fn label(&self) -> &'static str {
        self.token()
    }

    fn from_token(raw: &str) -> Option<Self> {
        let raw = raw.trim();
        Self::ALL.iter().copied().find(|c| c.token() == raw)
    }
}

macro_rules! choice_serde {
    ($ty:ty) => {
        impl Serialize for $ty {
            fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
                serializer.serialize_str(self.token())
            }
        }

        impl<'de> Deserialize<'de> for $ty {
            fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
                let raw = String::deserialize(deserializer)?;
                <$ty>::from_token(&raw)
                    .ok_or_else(|| serde::de::Error::custom(format!("unknown option `{}`", raw)))
            }
        }

        impl fmt::Display for $ty {
            fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
                f.write_str(self.label())
            }
        }
    };
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Destination {
    Etosha,
    SkeletonCoast,
    Damaraland,
    Sossusvlei,
    Swakopmund,
    CapriviStrip,
}

impl Choice for Destination {
    const ALL: &'static [Self] = &[
        Destination::Etosha,
        Destination::SkeletonCoast,
        Destination::Damaraland,
        Destination::Sossusvlei,
        Destination::Swakopmund,
        Destination::CapriviStrip,
    ];

    fn token(&self) -> &'static str {
        match self {
            Destination::Etosha => "Etosha National Park",
            Destination::SkeletonCoast => "Skeleton Coast",
            Destination::Damaraland => "Damaraland",
            Destination::Sossusvlei => "Sossusvlei",
            Destination::Swakopmund => "Swakopmund",
            Destination::CapriviStrip => "Caprivi Strip",
        }
    }
}

choice_serde!(Destination);

/// Trip length in days.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum TripDuration {
    OneWeek,
    TwoWeeks,
    ThreeWeeks,
    FourWeeks,
}

impl Choice for TripDuration {
    const ALL: &'static [Self] = &[
        TripDuration::OneWeek,
        TripDuration::TwoWeeks,
        TripDuration::ThreeWeeks,
        TripDuration::FourWeeks,
    ];

    fn token(&self) -> &'static str {
        match self {
            TripDuration::OneWeek => "7",
            TripDuration::TwoWeeks => "14",
            TripDuration::ThreeWeeks => "21",
            TripDuration::FourWeeks => "28",
        }
    }

    fn label(&self) -> &'static str {
        match self {
            TripDuration::OneWeek => "1 week",
            TripDuration::TwoWeeks => "2 weeks",
            TripDuration::ThreeWeeks => "3 weeks",
            TripDuration::FourWeeks => "4 weeks",
        }
    }
}

choice_serde!(TripDuration);

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum FlightClass {
    #[default]
    Economy,
    Business,
    Private,
}

impl Choice for FlightClass {
    const ALL: &'static [Self] = &[FlightClass::Economy, FlightClass::Business, FlightClass::Private];

    fn token(&self) -> &'static str {
        match self {
            FlightClass::Economy => "economy",
            FlightClass::Business => "business",
            FlightClass::Private => "private",
        }
    }

    fn label(&self) -> &'static str {
        match self {
            FlightClass::Economy => "Economy",
            FlightClass::Business => "Business",
            FlightClass::Private => "Private",
        }
    }
}

choice_serde!(FlightClass);

/// Budget range per person, in US dollars.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Budget {
    From2000To3000,
    From3000To5000,
    From5000To7000,
    Above7000,
}

impl Choice for Budget {
    const ALL: &'static [Self] = &[
        Budget::From2000To3000,
        Budget::From3000To5000,
        Budget::From5000To7000,
        Budget::Above7000,
    ];

    fn token(&self) -> &'static str {
        match self {
            Budget::From2000To3000 => "2000-3000",
            Budget::From3000To5000 => "3000-5000",
            Budget::From5000To7000 => "5000-7000",
            Budget::Above7000 => "7000+",
        }
    }

    fn label(&self) -> &'static str {
        match self {
            Budget::From2000To3000 => "$2,000 - $3,000",
            Budget::From3000To5000 => "$3,000 - $5,000",
            Budget::From5000To7000 => "$5,000 - $7,000",
            Budget::Above7000 => "$7,000+",
        }
    }
}

choice_serde!(Budget);

/// Trip purpose tag. Declaration order is the display order, and `Ord`
/// follows it so a `MotiveSet` always lists motives the same way.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub enum Motive {
    LandAndPeople,
    WellnessAndRelaxation,
    BeachAndSea,
    Culture,
    NatureAndAnimals,
    SportAndAdventure,
    CulinaryArts,
    Honeymoon,
}

impl Choice for Motive {
    const ALL: &'static [Self] = &[
        Motive::LandAndPeople,
        Motive::WellnessAndRelaxation,
        Motive::BeachAndSea,
        Motive::Culture,
        Motive::NatureAndAnimals,
        Motive::SportAndAdventure,
        Motive::CulinaryArts,
        Motive::Honeymoon,
    ];

    fn token(&self) -> &'static str {
        match self {
            Motive::LandAndPeople => "Land & People",
            Motive::WellnessAndRelaxation => "Wellness & Relaxation",
            Motive::BeachAndSea => "Beach & Sea",
            Motive::Culture => "Culture",
            Motive::NatureAndAnimals => "Nature & Animals",
            Motive::SportAndAdventure => "Sport & Adventure",
            Motive::CulinaryArts => "Culinary Arts",
            Motive::Honeymoon => "Honeymoon",
        }
    }
}

choice_serde!(Motive);

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct MotiveSet(BTreeSet<Motive>);

impl MotiveSet {
    /// Adds the motive if absent, removes it if present. Returns whether it
    /// is selected afterwards.
    pub fn toggle(&mut self, motive: Motive) -> bool {
        if self.0.remove(&motive) {
            false
        } else {
            self.0.insert(motive);
            true
        }
    }

    pub fn contains(&self, motive: Motive) -> bool {
        self.0.contains(&motive)
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = Motive> + '_ {
        self.0.iter().copied()
    }
}

impl FromIterator<Motive> for MotiveSet {
    fn from_iter<I: IntoIterator<Item = Motive>>(iter: I) -> Self {
        MotiveSet(iter.into_iter().collect())
    }
}

/// Every field a visitor can fill in, keyed by its form input name.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Field {
    FirstName,
    LastName,
    Email,
    Phone,
    Country,
    Destination,
    Duration,
    Travelers,
    TravelDate,
    FlightClass,
    Budget,
    Motives,
    SpecialRequirements,
}

impl Field {
    pub const ALL: &'static [Field] = &[
        Field::FirstName,
        Field::LastName,
        Field::Email,
        Field::Phone,
        Field::Country,
        Field::Destination,
        Field::Duration,
        Field::Travelers,
        Field::TravelDate,
        Field::FlightClass,
        Field::Budget,
        Field::Motives,
        Field::SpecialRequirements,
    ];

    pub fn form_name(&self) -> &'static str {
        match self {
            Field::FirstName => "first_name",
            Field::LastName => "last_name",
            Field::Email => "email",
            Field::Phone => "phone",
            Field::Country => "country",
            Field::Destination => "destination",
            Field::Duration => "duration",
            Field::Travelers => "travelers",
            Field::TravelDate => "travel_date",
            Field::FlightClass => "flight_class",
            Field::Budget => "budget",
            Field::Motives => "motives",
            Field::SpecialRequirements => "special_requirements",
        }
    }

    pub fn from_form_name(name: &str) -> Option<Field> {
        Field::ALL.iter().copied().find(|f| f.form_name() == name)
    }

    pub fn label(&self) -> &'static str {
        match self {
            Field::FirstName => "First name",
            Field::LastName => "Last name",
            Field::Email => "Email address",
            Field::Phone => "Phone number",
            Field::Country => "Country of residence",
            Field::Destination => "Destination",
            Field::Duration => "Trip duration",
            Field::Travelers => "Number of travelers",
            Field::TravelDate => "Travel date",
            Field::FlightClass => "Flight class",
            Field::Budget => "Budget",
            Field::Motives => "Motives",
            Field::SpecialRequirements => "Special requirements",
        }
    }
}

/// Everything collected by the booking wizard. Setters consume the current
/// snapshot and hand back a new one with a single attribute replaced.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct BookingRequest {
    pub first_name: String,
    pub last_name: String,
    pub email: String,
    pub phone: String,
    pub country: String,
    #[serde(with = "blank_choice")]
    pub destination: Option<Destination>,
    #[serde(with = "blank_choice")]
    pub duration: Option<TripDuration>,
    pub travelers: u32,
    #[serde(with = "blank_date")]
    pub travel_date: Option<NaiveDate>,
    pub flight_class: FlightClass,
    #[serde(with = "blank_choice")]
    pub budget: Option<Budget>,
    pub motives: MotiveSet,
    pub special_requirements: String,
}

impl Default for BookingRequest {
    fn default() -> Self {
        Self {
            first_name: String::new(),
            last_name: String::new(),
            email: String::new(),
            phone: String::new(),
            country: String::new(),
            destination: None,
            duration: None,
            travelers: 1,
            travel_date: None,
            flight_class: FlightClass::Economy,
            budget: None,
            motives: MotiveSet::default(),
            special_requirements: String::new(),
        }
    }
}

impl BookingRequest {
    pub fn with_first_name(self, first_name: impl Into<String>) -> Self {
        Self { first_name: first_name.into(), ..self }
    }

    pub fn with_last_name(self, last_name: impl Into<String>) -> Self {
        Self { last_name: last_name.into(), ..self }
    }

    pub fn with_email(self, email: impl Into<String>) -> Self {
        Self { email: email.into(), ..self }
    }

    pub fn with_phone(self, phone: impl Into<String>) -> Self {
        Self { phone: phone.into(), ..self }
    }

    pub fn with_country(self, country: impl Into<String>) -> Self {
        Self { country: country.into(), ..self }
    }

    pub fn with_destination(self, destination: Option<Destination>) -> Self {
        Self { destination, ..self }
    }

    pub fn with_duration(self, duration: Option<TripDuration>) -> Self {
        Self { duration, ..self }
    }

    pub fn with_travelers(self, travelers: u32) -> Self {
        Self { travelers, ..self }
    }

    pub fn with_travel_date(self, travel_date: Option<NaiveDate>) -> Self {
        Self { travel_date, ..self }
    }

    pub fn with_flight_class(self, flight_class: FlightClass) -> Self {
        Self { flight_class, ..self }
    }

    pub fn with_budget(self, budget: Option<Budget>) -> Self {
        Self { budget, ..self }
    }

    pub fn with_special_requirements(self, special_requirements: impl Into<String>) -> Self {
        Self { special_requirements: special_requirements.into(), ..self }
    }

    pub fn toggling_motive(self, motive: Motive) -> Self {
        let mut motives = self.motives.clone();
        motives.toggle(motive);
        Self { motives, ..self }
    }

    pub fn to_json(&self) -> String {
        serde_json::to_string(self).unwrap_or_default()
    }
}

/// Optional choices travel as `""` when unset.
mod blank_choice {
    use super::Choice;
    use serde::{Deserialize, Deserializer, Serializer};

    pub fn serialize<S: Serializer, T: Choice>(value: &Option<T>, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.serialize_str(value.map(|v| v.token()).unwrap_or(""))
    }

    pub fn deserialize<'de, D: Deserializer<'de>, T: Choice>(deserializer: D) -> Result<Option<T>, D::Error> {
        let raw = String::deserialize(deserializer)?;
        if raw.trim().is_empty() {
            return Ok(None);
        }
        T::from_token(&raw)
            .map(Some)
            .ok_or_else(|| serde::de::Error::custom(format!("unknown option `{}`", raw)))
    }
}

mod blank_date {
    use chrono::NaiveDate;
    use serde::{Deserialize, Deserializer, Serializer};

    pub const FORMAT: &str = "%Y-%m-%d";

    pub fn serialize<S: Serializer>(value: &Option<NaiveDate>, serializer: S) -> Result<S::Ok, S::Error> {
        match value {
            Some(date) => serializer.serialize_str(&date.format(FORMAT).to_string()),
            None => serializer.serialize_str(""),
        }
    }

    pub fn deserialize<'de, D: Deserializer<'de>>(deserializer: D) -> Result<Option<NaiveDate>, D::Error> {
        let raw = String::deserialize(deserializer)?;
        if raw.trim().is_empty() {
            return Ok(None);
        }
        NaiveDate::parse_from_str(raw.trim(), FORMAT)
            .map(Some)
            .map_err(serde::de::Error::custom)
    }
}

pub use blank_date::FORMAT as DATE_FORMAT;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_motive_toggle_is_symmetric() {
        let mut motives = MotiveSet::default();
        assert!(motives.toggle(Motive::Culture));
        assert!(motives.contains(Motive::Culture));
        assert!(!motives.toggle(Motive::Culture));
        assert!(motives.is_empty());
    }

    #[test]
    fn test_motive_set_lists_in_option_order() {
        let motives: MotiveSet = [Motive::Honeymoon, Motive::Culture, Motive::LandAndPeople]
            .into_iter()
            .collect();
        let json = serde_json::to_string(&motives).unwrap();
        assert_eq!(json, r#"["Land & People","Culture","Honeymoon"]"#);
    }

    #[test]
    fn test_setters_replace_a_single_field() {
        let before = BookingRequest::default().with_first_name("Jane").with_country("UK");
        let after = before.clone().with_travelers(3);
        assert_eq!(after.travelers, 3);
        assert_eq!(after.first_name, "Jane");
        assert_eq!(after.country, "UK");
        assert_eq!(BookingRequest { travelers: 3, ..before }, after);
    }

    #[test]
    fn test_default_request_serializes_blanks() {
        let json: serde_json::Value = serde_json::to_value(BookingRequest::default()).unwrap();
        assert_eq!(json["destination"], "");
        assert_eq!(json["duration"], "");
        assert_eq!(json["travelDate"], "");
        assert_eq!(json["budget"], "");
        assert_eq!(json["travelers"], 1);
        assert_eq!(json["flightClass"], "economy");
        assert_eq!(json["motives"], serde_json::json!([]));
    }

    #[test]
    fn test_request_reads_back_from_session_json() {
        let request = BookingRequest::default()
            .with_destination(Some(Destination::Sossusvlei))
            .with_duration(Some(TripDuration::ThreeWeeks))
            .with_travel_date(NaiveDate::from_ymd_opt(2025, 6, 1))
            .with_budget(Some(Budget::Above7000))
            .toggling_motive(Motive::BeachAndSea);
        let parsed: BookingRequest = serde_json::from_str(&request.to_json()).unwrap();
        assert_eq!(parsed, request);
    }

    #[test]
    fn test_unknown_choice_token_is_rejected() {
        assert_eq!(Destination::from_token("Atlantis"), None);
        assert_eq!(Destination::from_token(" Damaraland "), Some(Destination::Damaraland));
        let result: Result<FlightClass, _> = serde_json::from_str("\"first\"");
        assert!(result.is_err());
    }

    #[test]
    fn test_field_form_names_round_trip() {
        for field in Field::ALL {
            assert_eq!(Field::from_form_name(field.form_name()), Some(*field));
        }
        assert_eq!(Field::from_form_name("action"), None);
    }
}
