//! Synthetic lost-item record generation.
//!
//! [`RecordSynthesizer`] owns a single random source for its whole lifetime.
//! Seed it once ([`RecordSynthesizer::seeded`]) for reproducible batches, or
//! from OS entropy for real seeding runs. Generation performs no I/O and
//! never fails as long as the catalog passes
//! [`validate_catalog`](crate::catalog::validate_catalog).

use chrono::Utc;
use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};

use crate::catalog::{
    self, CONTACT, DOMESTIC_CURRENCY_ID, FIND_PLACE, FOREIGN_CURRENCY, MAX_KEYWORDS,
    PERSONAL_NOTICE, PLACEHOLDER_IMAGES,
};
use crate::record::{Color, Currency, Item, JapaneseCurrency, LostItemRecord, Status};
use crate::types::Timestamp;

// ---------------------------------------------------------------------------
// Constants
// ---------------------------------------------------------------------------

/// Probability that a record carries a currency block.
pub const CURRENCY_PROBABILITY: f64 = 0.5;

/// Probability that a record carries a find place.
pub const FIND_PLACE_PROBABILITY: f64 = 0.5;

/// Probability that a record carries the placeholder images.
pub const IMAGE_PROBABILITY: f64 = 0.7;

/// Probability that a record carries the personal-information notice.
pub const PERSONAL_PROBABILITY: f64 = 0.3;

/// Inclusive bounds of the domestic denomination count.
pub const CURRENCY_COUNT_RANGE: std::ops::RangeInclusive<u32> = 1..=999;

/// Length of the management number in hex characters.
pub const MNGMT_NO_LENGTH: usize = 8;

// ---------------------------------------------------------------------------
// Record source
// ---------------------------------------------------------------------------

/// Anything that can hand out fully built records one at a time.
pub trait RecordSource {
    fn next_record(&mut self) -> LostItemRecord;
}

// ---------------------------------------------------------------------------
// Synthesizer
// ---------------------------------------------------------------------------

/// Builds internally consistent [`LostItemRecord`]s from the catalog.
pub struct RecordSynthesizer<R = StdRng> {
    rng: R,
    clock: fn() -> Timestamp,
}

impl RecordSynthesizer<StdRng> {
    /// Synthesizer with a deterministic generator seeded from `seed`.
    pub fn seeded(seed: u64) -> Self {
        Self::new(StdRng::seed_from_u64(seed))
    }

    /// Synthesizer seeded once from OS entropy.
    pub fn from_entropy() -> Self {
        Self::new(StdRng::from_os_rng())
    }
}

impl<R: Rng> RecordSynthesizer<R> {
    pub fn new(rng: R) -> Self {
        Self {
            rng,
            clock: Utc::now,
        }
    }

    /// Replace the clock used for `dateFound`.
    pub fn with_clock(mut self, clock: fn() -> Timestamp) -> Self {
        self.clock = clock;
        self
    }

    /// Generate one record.
    pub fn generate(&mut self) -> LostItemRecord {
        let create_user_place = pick(&mut self.rng, catalog::MUNICIPALITIES).to_string();

        // The label and the template are independent draws; only the label
        // reaches `categoryName` and `memo`.
        let subcategory = *pick(&mut self.rng, catalog::SUBCATEGORIES);
        let template = pick(&mut self.rng, catalog::ITEM_TEMPLATES);
        let mut item = Item::from(template);
        item.category_name = subcategory.to_string();
        let memo = format!("{subcategory}が見つかりました。");

        let is_valuables = item.is_valuable();

        let color = Color::from(pick(&mut self.rng, catalog::COLORS));

        let currency = self
            .rng
            .random_bool(CURRENCY_PROBABILITY)
            .then(|| Currency {
                foreign_currency: Some(FOREIGN_CURRENCY.to_string()),
                japanese_currency: Some(vec![JapaneseCurrency {
                    count: self.rng.random_range(CURRENCY_COUNT_RANGE),
                    id: DOMESTIC_CURRENCY_ID.to_string(),
                }]),
            });

        let find_place = self
            .rng
            .random_bool(FIND_PLACE_PROBABILITY)
            .then(|| FIND_PLACE.to_string());

        let image_url = if self.rng.random_bool(IMAGE_PROBABILITY) {
            PLACEHOLDER_IMAGES.iter().map(|s| s.to_string()).collect()
        } else {
            Vec::new()
        };

        let keyword = self.sample_keywords();

        let mngmt_no = self.management_number();

        let personal = self
            .rng
            .random_bool(PERSONAL_PROBABILITY)
            .then(|| PERSONAL_NOTICE.to_string());

        let status = Status::from(pick(&mut self.rng, catalog::STATUSES));

        let id = uuid::Builder::from_random_bytes(self.rng.random())
            .into_uuid()
            .to_string();

        LostItemRecord {
            id,
            create_user_place,
            create_user_id: None,
            date_found: (self.clock)(),
            date_updated: None,
            memo,
            contact: CONTACT.to_string(),
            color,
            currency,
            find_place,
            image_url,
            is_valuables,
            item,
            keyword,
            mngmt_no,
            personal,
            status,
        }
    }

    /// Draw 1..=MAX_KEYWORDS distinct keywords, skipping repeats.
    fn sample_keywords(&mut self) -> Vec<String> {
        let target = self.rng.random_range(1..=MAX_KEYWORDS);
        let mut keywords: Vec<String> = Vec::with_capacity(target);
        while keywords.len() < target {
            let candidate = *pick(&mut self.rng, catalog::KEYWORDS);
            if !keywords.iter().any(|k| k == candidate) {
                keywords.push(candidate.to_string());
            }
        }
        keywords
    }

    fn management_number(&mut self) -> String {
        let value: u32 = self.rng.random();
        format!("{value:0width$x}", width = MNGMT_NO_LENGTH)
    }
}

impl<R: Rng> RecordSource for RecordSynthesizer<R> {
    fn next_record(&mut self) -> LostItemRecord {
        self.generate()
    }
}

/// Uniformly pick one entry. The catalog guarantees `items` is non-empty.
fn pick<'a, T, R: Rng + ?Sized>(rng: &mut R, items: &'a [T]) -> &'a T {
    &items[rng.random_range(0..items.len())]
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
