use serde::{Deserialize, Deserializer};
use serde_json::{Map, Value};
use std::fmt;

/// Where the star icons are served from, one per whole rating.
pub const STAR_ICON_DIR: &str = "/assets/images/icons";

/// The keys a card knows how to show.
pub const RECORD_FIELDS: [&str; 9] = [
    "imgSrc",
    "imgAlt",
    "titleLnk",
    "titleTxt",
    "organization",
    "rating",
    "numRatings",
    "lengthTime",
    "ingredients",
];

/// What a card shows for one stored entry. Read leniently: a value of the
/// wrong type shows as its JSON text, `null` and missing keys show nothing.
/// The stored entry itself is never rewritten from this.
#[derive(Debug, Clone, Default, PartialEq, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Recipe {
    #[serde(default, deserialize_with = "text_field")]
    pub img_src: Option<String>,
    #[serde(default, deserialize_with = "text_field")]
    pub img_alt: Option<String>,
    #[serde(default, deserialize_with = "text_field")]
    pub title_lnk: Option<String>,
    #[serde(default, deserialize_with = "text_field")]
    pub title_txt: Option<String>,
    #[serde(default, deserialize_with = "text_field")]
    pub organization: Option<String>,
    #[serde(default, deserialize_with = "value_field")]
    pub rating: Option<FieldValue>,
    #[serde(default, deserialize_with = "value_field")]
    pub num_ratings: Option<FieldValue>,
    #[serde(default, deserialize_with = "text_field")]
    pub length_time: Option<String>,
    #[serde(default, deserialize_with = "text_field")]
    pub ingredients: Option<String>,
}

fn text_field<'de, D: Deserializer<'de>>(deserializer: D) -> Result<Option<String>, D::Error> {
    Ok(match Value::deserialize(deserializer)? {
        Value::Null => None,
        Value::String(s) => Some(s),
        other => Some(other.to_string()),
    })
}

fn value_field<'de, D: Deserializer<'de>>(
    deserializer: D,
) -> Result<Option<FieldValue>, D::Error> {
    Ok(match Value::deserialize(deserializer)? {
        Value::Null => None,
        Value::Number(n) => Some(FieldValue::Number(n)),
        Value::String(s) => Some(FieldValue::Text(s)),
        other => Some(FieldValue::Text(other.to_string())),
    })
}

/// Numeric fields arrive as JSON numbers from seeded data and as strings from
/// the form.
#[derive(Debug, Clone, PartialEq)]
pub enum FieldValue {
    Number(serde_json::Number),
    Text(String),
}

impl FieldValue {
    /// A JSON number with no fractional part. Text never counts, even when it
    /// reads as a number.
    pub fn as_integer(&self) -> Option<i64> {
        match self {
            FieldValue::Number(n) => n.as_i64().or_else(|| whole_f64(n).map(|f| f as i64)),
            FieldValue::Text(_) => None,
        }
    }
}

fn whole_f64(n: &serde_json::Number) -> Option<f64> {
    n.as_f64()
        .filter(|f| f.is_finite() && f.fract() == 0.0 && f.abs() < 1e21)
}

impl fmt::Display for FieldValue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            FieldValue::Number(n) if n.is_f64() => match whole_f64(n) {
                Some(whole) => write!(f, "{:.0}", whole),
                None => write!(f, "{}", n),
            },
            FieldValue::Number(n) => write!(f, "{}", n),
            FieldValue::Text(s) => f.write_str(s),
        }
    }
}

impl From<i64> for FieldValue {
    fn from(value: i64) -> Self {
        FieldValue::Number(value.into())
    }
}

impl From<&str> for FieldValue {
    fn from(value: &str) -> Self {
        FieldValue::Text(value.to_string())
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct StarRating(u8);

impl StarRating {
    /// Exact match on the numbers 0..=5, everything else shows as zero stars.
    pub fn select(rating: Option<&FieldValue>) -> Self {
        match rating.and_then(FieldValue::as_integer) {
            Some(stars @ 0..=5) => StarRating(stars as u8),
            _ => StarRating(0),
        }
    }

    pub fn stars(self) -> u8 {
        self.0
    }

    pub fn icon_src(self) -> String {
        format!("{}/{}-star.svg", STAR_ICON_DIR, self.0)
    }

    pub fn icon_alt(self) -> String {
        match self.0 {
            1 => "1 star".to_string(),
            n => format!("{} stars", n),
        }
    }
}

/// Folds submitted form controls into the flat record that gets stored. A
/// name that appears twice keeps its last value.
pub fn form_record<I, K, V>(fields: I) -> Map<String, Value>
where
    I: IntoIterator<Item = (K, V)>,
    K: Into<String>,
    V: Into<String>,
{
    let mut record = Map::new();
    for (key, value) in fields {
        record.insert(key.into(), Value::String(value.into()));
    }
    record
}

impl Recipe {
    /// `None` for entries that aren't JSON objects; their card stays empty.
    pub fn from_value(entry: &Value) -> Option<Recipe> {
        if !entry.is_object() {
            return None;
        }
        Recipe::deserialize(entry).ok()
    }

    pub fn star_rating(&self) -> StarRating {
        StarRating::select(self.rating.as_ref())
    }

    pub fn rating_text(&self) -> String {
        self.rating
            .as_ref()
            .map(FieldValue::to_string)
            .unwrap_or_default()
    }

    pub fn num_ratings_text(&self) -> String {
        let count = self
            .num_ratings
            .as_ref()
            .map(FieldValue::to_string)
            .unwrap_or_default();
        format!("({})", count)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn whole_ratings_select_their_own_icon() {
        for stars in 0..=5i64 {
            let rating = StarRating::select(Some(&FieldValue::from(stars)));
            assert_eq!(rating.stars() as i64, stars);
            assert_eq!(
                rating.icon_src(),
                format!("/assets/images/icons/{}-star.svg", stars)
            );
        }
        assert_eq!(StarRating::select(Some(&FieldValue::from(1i64))).icon_alt(), "1 star");
        assert_eq!(StarRating::select(Some(&FieldValue::from(4i64))).icon_alt(), "4 stars");
    }

    #[test]
    fn out_of_range_ratings_fall_back_to_zero() {
        for rating in [
            Some(FieldValue::from(-1i64)),
            Some(FieldValue::from(6i64)),
            Some(FieldValue::from("abc")),
            Some(FieldValue::Number(serde_json::Number::from_f64(2.5).unwrap())),
            None,
        ] {
            let selected = StarRating::select(rating.as_ref());
            assert_eq!(selected.stars(), 0);
            assert_eq!(selected.icon_alt(), "0 stars");
        }
    }

    #[test]
    fn rating_text_never_matches_an_icon() {
        let submitted = Recipe {
            rating: Some("3".into()),
            ..Recipe::default()
        };
        assert_eq!(submitted.star_rating().stars(), 0);
        assert_eq!(submitted.rating_text(), "3");
    }

    #[test]
    fn whole_floats_print_like_integers() {
        let recipe = Recipe::from_value(&json!({"rating": 3.0, "numRatings": 1e2})).unwrap();
        assert_eq!(recipe.rating_text(), "3");
        assert_eq!(recipe.num_ratings_text(), "(100)");
        assert_eq!(recipe.star_rating().stars(), 3);

        let half = Recipe::from_value(&json!({"rating": 4.5})).unwrap();
        assert_eq!(half.rating_text(), "4.5");
    }

    #[test]
    fn form_fields_keep_the_last_duplicate() {
        let record = form_record([("titleTxt", "First"), ("rating", "2"), ("titleTxt", "Soup")]);
        assert_eq!(Value::Object(record), json!({"titleTxt": "Soup", "rating": "2"}));
    }

    #[test]
    fn loosely_typed_fields_show_their_json_text() {
        let recipe = Recipe::from_value(&json!({
            "titleTxt": "Pie",
            "organization": 42,
            "rating": true,
            "imgAlt": null,
            "servings": "2"
        }))
        .unwrap();
        assert_eq!(recipe.organization.as_deref(), Some("42"));
        assert_eq!(recipe.rating, Some(FieldValue::from("true")));
        assert_eq!(recipe.star_rating().stars(), 0);
        assert_eq!(recipe.img_alt, None);
    }

    #[test]
    fn non_objects_have_no_recipe() {
        for entry in [json!(null), json!(3), json!(["titleTxt"]), json!("Soup")] {
            assert_eq!(Recipe::from_value(&entry), None);
        }
    }

    #[test]
    fn missing_counts_render_empty() {
        let recipe = Recipe::default();
        assert_eq!(recipe.rating_text(), "");
        assert_eq!(recipe.num_ratings_text(), "()");
    }
}
