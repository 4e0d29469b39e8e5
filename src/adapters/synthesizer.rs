use crate::domain::endpoint::Endpoint;
use crate::domain::schema::{SchemaNode, SchemaType};
use base64::Engine as _;
use chrono::{DateTime, SecondsFormat, Utc};
use fake::faker::address::en::{BuildingNumber, StreetName};
use fake::faker::internet::en::{DomainSuffix, Password, SafeEmail, IPv4, IPv6};
use fake::faker::lorem::en::{Word, Words};
use fake::faker::name::en::Name;
use fake::faker::phone_number::en::PhoneNumber;
use fake::Fake;
use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};
use serde_json::{json, Map, Number, Value};
use tracing::{debug, warn};

/// Literal emitted for `format: binary`.
pub const BINARY_PLACEHOLDER: &str = "fake-binary-data";
/// Plain text whose base64 form is emitted for `format: byte`.
pub const BYTE_PLACEHOLDER_SOURCE: &str = "fake-byte-string";
/// Length of the digit string emitted for digit-requiring patterns.
pub const PATTERN_DIGITS_LEN: usize = 10;

// 2000-01-01T00:00:00Z .. 2030-01-01T00:00:00Z
const DATE_RANGE_START: i64 = 946_684_800;
const DATE_RANGE_END: i64 = 1_893_456_000;

/// Knobs for the randomized parts of synthesis.
#[derive(Debug, Clone, PartialEq)]
pub struct SynthesisOptions {
    /// Chance that a non-required property is emitted.
    pub optional_property_probability: f64,
    pub array_min_items: usize,
    pub array_max_items: usize,
    /// Lower bound used when a numeric schema has no `minimum`.
    pub number_minimum: f64,
    /// Upper bound used when a numeric schema has no `maximum`.
    pub number_maximum: f64,
}

impl Default for SynthesisOptions {
    fn default() -> Self {
        Self {
            optional_property_probability: 0.7,
            array_min_items: 1,
            array_max_items: 4,
            number_minimum: 0.0,
            number_maximum: 1000.0,
        }
    }
}

/// Produces example values from schema nodes.
///
/// Generation is randomized through the injected RNG: two calls on the same
/// schema usually differ, two synthesizers seeded alike produce the same
/// sequence. Nothing here returns an error; malformed or underspecified
/// schemas degrade to the emptiest value of their shape.
pub struct Synthesizer<R: Rng = StdRng> {
    rng: R,
    options: SynthesisOptions,
}

impl Synthesizer<StdRng> {
    pub fn seeded(seed: u64) -> Self {
        Self::new(StdRng::seed_from_u64(seed))
    }

    pub fn from_entropy() -> Self {
        Self::new(StdRng::from_entropy())
    }

    /// Seeded when `seed` is given, entropy-backed otherwise.
    pub fn from_seed_option(seed: Option<u64>, options: SynthesisOptions) -> Self {
        let rng = match seed {
            Some(seed) => StdRng::seed_from_u64(seed),
            None => StdRng::from_entropy(),
        };
        Self::with_options(rng, options)
    }
}

impl<R: Rng> Synthesizer<R> {
    pub fn new(rng: R) -> Self {
        Self::with_options(rng, SynthesisOptions::default())
    }

    pub fn with_options(rng: R, options: SynthesisOptions) -> Self {
        Self { rng, options }
    }

    pub fn options(&self) -> &SynthesisOptions {
        &self.options
    }

    /// Generate one example value for `schema`.
    pub fn synthesize(&mut self, schema: &SchemaNode) -> Value {
        if let Some(reference) = &schema.reference {
            warn!("Found unresolved $ref: {}", reference);
            return json!({ "$ref": reference });
        }

        if let Some(members) = schema.all_of.as_deref().filter(|m| !m.is_empty()) {
            return self.synthesize_all_of(members);
        }

        if let Some(members) = schema.one_of.as_deref().filter(|m| !m.is_empty()) {
            return self.synthesize_one_of(members);
        }

        if let Some(members) = schema.any_of.as_deref().filter(|m| !m.is_empty()) {
            return self.synthesize_one_of(members);
        }

        match schema.primary_type() {
            Some(SchemaType::Object) => self.synthesize_object(schema),
            Some(SchemaType::Array) => self.synthesize_array(schema),
            Some(SchemaType::String) => self.synthesize_string(schema),
            Some(SchemaType::Number) => self.synthesize_number(schema, false),
            Some(SchemaType::Integer) => self.synthesize_number(schema, true),
            Some(SchemaType::Boolean) => self
                .pick_enum(schema)
                .unwrap_or_else(|| Value::Bool(self.rng.gen_bool(0.5))),
            Some(SchemaType::Null) => Value::Null,
            None if schema.properties.is_some() => self.synthesize_object(schema),
            None => self.synthesize_untyped(schema),
        }
    }

    /// Shallow merge in list order; later members win on key conflicts.
    fn synthesize_all_of(&mut self, members: &[SchemaNode]) -> Value {
        let mut merged = Map::new();
        for member in members {
            match self.synthesize(member) {
                Value::Object(fields) => merged.extend(fields),
                other => debug!("Ignoring non-object allOf member value: {}", other),
            }
        }
        Value::Object(merged)
    }

    // Picks uniformly without checking the branch against sibling constraints.
    fn synthesize_one_of(&mut self, members: &[SchemaNode]) -> Value {
        let index = self.rng.gen_range(0..members.len());
        self.synthesize(&members[index])
    }

    fn synthesize_object(&mut self, schema: &SchemaNode) -> Value {
        let mut result = Map::new();

        let Some(properties) = &schema.properties else {
            return Value::Object(result);
        };

        let probability = self.options.optional_property_probability.clamp(0.0, 1.0);
        for (name, property) in properties {
            if !schema.is_required(name) && !self.rng.gen_bool(probability) {
                continue;
            }
            let value = self.synthesize(property);
            result.insert(name.clone(), value);
        }

        Value::Object(result)
    }

    fn synthesize_array(&mut self, schema: &SchemaNode) -> Value {
        let Some(items) = &schema.items else {
            return Value::Array(vec![]);
        };

        let min = self.options.array_min_items;
        let max = self.options.array_max_items.max(min);
        let count = self.rng.gen_range(min..=max);

        Value::Array((0..count).map(|_| self.synthesize(items)).collect())
    }

    fn synthesize_string(&mut self, schema: &SchemaNode) -> Value {
        if let Some(literal) = schema.format.as_deref().and_then(|f| self.format_literal(f)) {
            return Value::String(literal);
        }

        if let Some(value) = self.pick_enum(schema) {
            return value;
        }

        if let Some(pattern) = &schema.pattern {
            return Value::String(self.pattern_literal(pattern));
        }

        let hint = schema
            .description
            .as_deref()
            .map(str::to_lowercase)
            .unwrap_or_default();

        let text = if hint.contains("name") {
            Name().fake_with_rng::<String, _>(&mut self.rng)
        } else if hint.contains("address") {
            format!(
                "{} {}",
                BuildingNumber().fake_with_rng::<String, _>(&mut self.rng),
                StreetName().fake_with_rng::<String, _>(&mut self.rng)
            )
        } else if hint.contains("phone") {
            PhoneNumber().fake_with_rng::<String, _>(&mut self.rng)
        } else {
            let words: Vec<String> = Words(1..6).fake_with_rng(&mut self.rng);
            self.fit_length(words.join(" "), schema.min_length, schema.max_length)
        };

        Value::String(text)
    }

    /// Format-correct literal for the known string formats, `None` otherwise.
    fn format_literal(&mut self, format: &str) -> Option<String> {
        let literal = match format {
            "email" => SafeEmail().fake_with_rng::<String, _>(&mut self.rng),
            "uri" | "url" => format!("https://www.{}", self.hostname()),
            "uuid" => self.uuid(),
            "date" => self.timestamp().format("%Y-%m-%d").to_string(),
            "date-time" => self.timestamp().to_rfc3339_opts(SecondsFormat::Millis, true),
            "password" => Password(8..17).fake_with_rng::<String, _>(&mut self.rng),
            "byte" => base64::engine::general_purpose::STANDARD.encode(BYTE_PLACEHOLDER_SOURCE),
            "binary" => BINARY_PLACEHOLDER.to_string(),
            "hostname" => self.hostname(),
            "ipv4" => IPv4().fake_with_rng::<String, _>(&mut self.rng),
            "ipv6" => IPv6().fake_with_rng::<String, _>(&mut self.rng),
            _ => return None,
        };
        Some(literal)
    }

    /// Best-effort stand-in for regex-driven generation. Patterns that ask for
    /// digits get a digit string; anything else is echoed back in a
    /// placeholder so the gap shows up in the output.
    fn pattern_literal(&mut self, pattern: &str) -> String {
        if pattern.contains("\\d") || pattern.contains("[0-9]") {
            return (0..PATTERN_DIGITS_LEN)
                .map(|_| char::from(b'0' + self.rng.gen_range(0..10u8)))
                .collect();
        }
        debug!("Unsupported string pattern, emitting placeholder: {}", pattern);
        format!("pattern:{}", pattern)
    }

    fn synthesize_number(&mut self, schema: &SchemaNode, integer: bool) -> Value {
        if let Some(value) = self.pick_enum(schema) {
            return value;
        }

        let min = schema.minimum.unwrap_or(self.options.number_minimum);
        let mut max = schema.maximum.unwrap_or(self.options.number_maximum);
        if !min.is_finite() || !max.is_finite() {
            return json!(0);
        }
        if min > max {
            debug!("Numeric bounds inverted ({} > {}), using minimum", min, max);
            max = min;
        }

        if integer {
            let (low, high) = (min.ceil(), max.floor());
            if low > high {
                debug!("No whole number within [{}, {}], using minimum", min, max);
                return Number::from_f64(min).map(Value::Number).unwrap_or(Value::Null);
            }
            // `as` saturates at the i64 limits.
            return json!(self.rng.gen_range(low as i64..=high as i64));
        }

        // Spans wider than f64::MAX are drawn at half scale.
        let drawn: f64 = if (max - min).is_finite() {
            self.rng.gen_range(min..=max)
        } else {
            self.rng.gen_range(min / 2.0..=max / 2.0) * 2.0
        };
        let mut rounded = round_cents(drawn, f64::round);
        if rounded > max {
            rounded = round_cents(max, f64::floor);
        }
        if rounded < min {
            rounded = round_cents(min, f64::ceil);
        }
        if rounded > max {
            // no two-decimal value inside the bounds
            rounded = drawn;
        }
        Number::from_f64(rounded)
            .map(Value::Number)
            .unwrap_or(Value::Null)
    }

    /// Nodes with no usable type: example, then default, then an enum entry.
    fn synthesize_untyped(&mut self, schema: &SchemaNode) -> Value {
        if let Some(example) = &schema.example {
            return example.clone();
        }
        if let Some(default) = &schema.default {
            return default.clone();
        }
        self.pick_enum(schema).unwrap_or(Value::Null)
    }

    fn pick_enum(&mut self, schema: &SchemaNode) -> Option<Value> {
        let values = schema.enum_values.as_deref().filter(|v| !v.is_empty())?;
        let index = self.rng.gen_range(0..values.len());
        Some(values[index].clone())
    }

    fn hostname(&mut self) -> String {
        let word: String = Word().fake_with_rng(&mut self.rng);
        let suffix: String = DomainSuffix().fake_with_rng(&mut self.rng);
        format!("{}.{}", word.to_lowercase(), suffix)
    }

    fn uuid(&mut self) -> String {
        let mut bytes = [0u8; 16];
        self.rng.fill(&mut bytes);
        bytes[6] = (bytes[6] & 0x0f) | 0x40;
        bytes[8] = (bytes[8] & 0x3f) | 0x80;
        uuid::Uuid::from_bytes(bytes).to_string()
    }

    fn timestamp(&mut self) -> DateTime<Utc> {
        let secs = self.rng.gen_range(DATE_RANGE_START..DATE_RANGE_END);
        DateTime::<Utc>::from_timestamp(secs, 0).unwrap_or_default()
    }

    /// Pads with extra words up to `min_length`, truncates at `max_length`.
    fn fit_length(&mut self, mut text: String, min: Option<usize>, max: Option<usize>) -> String {
        if let Some(min) = min.filter(|m| max.map_or(true, |max| *m <= max)) {
            while text.chars().count() < min {
                let word: String = Word().fake_with_rng(&mut self.rng);
                if word.is_empty() {
                    break;
                }
                if !text.is_empty() {
                    text.push(' ');
                }
                text.push_str(&word);
            }
        }
        if let Some(max) = max {
            if text.chars().count() > max {
                text = text.chars().take(max).collect::<String>().trim_end().to_string();
            }
        }
        text
    }
}

/// One-shot synthesis with the given RNG and default options.
pub fn synthesize<R: Rng>(schema: &SchemaNode, rng: R) -> Value {
    Synthesizer::new(rng).synthesize(schema)
}

// Round to two decimals with `op`; values too large to scale pass through.
fn round_cents(value: f64, op: fn(f64) -> f64) -> f64 {
    let scaled = value * 100.0;
    if scaled.is_finite() {
        op(scaled) / 100.0
    } else {
        value
    }
}

/// Which side of an operation an example is generated for.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ExampleKind {
    Request,
    Response,
}

impl<R: Rng> Synthesizer<R> {
    /// Fresh example for one side of `endpoint`, `None` when that side has
    /// no schema. Calling again regenerates.
    pub fn example_for(&mut self, endpoint: &Endpoint, kind: ExampleKind) -> Option<Value> {
        let schema = match kind {
            ExampleKind::Request => endpoint.request_schema.as_ref(),
            ExampleKind::Response => endpoint.response_schema.as_ref(),
        }?;
        Some(self.synthesize(schema))
    }
}
