//! Product reviews: lookup, statistics, sorting, filters and submissions.

use std::str::FromStr;

use chrono::Utc;
use serde::Serialize;

use sportswear_store_core::{ProductId, ReviewId};

use crate::catalog::{CatalogError, CatalogLoader};
use crate::models::Review;

/// Default size of the "recent" and "top rated" lists.
pub const DEFAULT_HIGHLIGHT_LIMIT: usize = 5;

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum ReviewSort {
    #[default]
    Newest,
    Oldest,
    RatingHigh,
    RatingLow,
    Helpful,
}

impl FromStr for ReviewSort {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "newest" => Ok(Self::Newest),
            "oldest" => Ok(Self::Oldest),
            "rating-high" => Ok(Self::RatingHigh),
            "rating-low" => Ok(Self::RatingLow),
            "helpful" => Ok(Self::Helpful),
            other => Err(format!("unknown review sort: {other}")),
        }
    }
}

/// Stable sort of a review list.
pub fn sort_reviews(reviews: &mut [&Review], sort: ReviewSort) {
    match sort {
        ReviewSort::Newest => reviews.sort_by(|a, b| b.date.cmp(&a.date)),
        ReviewSort::Oldest => reviews.sort_by(|a, b| a.date.cmp(&b.date)),
        ReviewSort::RatingHigh => reviews.sort_by(|a, b| b.rating.cmp(&a.rating)),
        ReviewSort::RatingLow => reviews.sort_by(|a, b| a.rating.cmp(&b.rating)),
        ReviewSort::Helpful => reviews.sort_by(|a, b| b.helpful.cmp(&a.helpful)),
    }
}

/// Review list filters; unset fields do not constrain.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ReviewFilter {
    pub min_rating: Option<u8>,
    pub verified_only: bool,
    pub with_media: bool,
    /// Reviewer country, compared case-insensitively.
    pub country: Option<String>,
}

impl ReviewFilter {
    #[must_use]
    pub fn matches(&self, review: &Review) -> bool {
        self.min_rating.is_none_or(|min| review.rating >= min)
            && (!self.verified_only || review.verified)
            && (!self.with_media || review.has_media())
            && self
                .country
                .as_deref()
                .is_none_or(|country| review.user_country.eq_ignore_ascii_case(country))
    }
}

/// Rating summary for a set of reviews.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct RatingStats {
    /// Mean rating rounded to one decimal; 0 without reviews.
    pub average: f64,
    pub total: usize,
    /// Review counts indexed by `stars - 1`.
    pub distribution: [usize; 5],
    /// Share of reviews per star level, in percent, indexed by `stars - 1`.
    pub percentages: [f64; 5],
}

impl RatingStats {
    #[must_use]
    pub fn compute(reviews: &[&Review]) -> Self {
        let mut distribution = [0usize; 5];
        let mut sum = 0u64;
        for review in reviews {
            let stars = review.rating.clamp(1, 5);
            if let Some(count) = distribution.get_mut(usize::from(stars - 1)) {
                *count += 1;
            }
            sum += u64::from(stars);
        }

        let total = reviews.len();
        if total == 0 {
            return Self {
                average: 0.0,
                total,
                distribution,
                percentages: [0.0; 5],
            };
        }

        #[allow(clippy::cast_precision_loss)] // review counts stay far below 2^52
        let count = total as f64;
        #[allow(clippy::cast_precision_loss)]
        let percentages = distribution.map(|n| n as f64 / count * 100.0);
        #[allow(clippy::cast_precision_loss)]
        let average = (sum as f64 / count * 10.0).round() / 10.0;

        Self {
            average,
            total,
            distribution,
            percentages,
        }
    }

    /// Number of reviews with `stars` stars.
    #[must_use]
    pub fn count(&self, stars: u8) -> usize {
        stars
            .checked_sub(1)
            .and_then(|index| self.distribution.get(usize::from(index)))
            .copied()
            .unwrap_or(0)
    }
}

/// Review fields supplied by the author; id, date and votes are assigned.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NewReview {
    pub product_id: ProductId,
    pub user_id: String,
    pub user_name: String,
    pub user_country: String,
    pub user_region: String,
    pub rating: u8,
    pub title: String,
    pub comment: String,
    pub images: Vec<String>,
    pub videos: Vec<String>,
    pub verified: bool,
}

/// All known reviews, newest submissions first.
#[derive(Debug, Clone, Default)]
pub struct ReviewBook {
    reviews: Vec<Review>,
}

impl ReviewBook {
    #[must_use]
    pub const fn new(reviews: Vec<Review>) -> Self {
        Self { reviews }
    }

    /// Fetch `reviews.json` through the catalog loader.
    ///
    /// # Errors
    ///
    /// Returns an error if the document cannot be fetched or parsed.
    pub async fn load(loader: &CatalogLoader) -> Result<Self, CatalogError> {
        let reviews = loader.reviews().await?;
        tracing::info!(count = reviews.len(), "Reviews loaded");
        Ok(Self::new(reviews))
    }

    #[must_use]
    pub fn all(&self) -> &[Review] {
        &self.reviews
    }

    #[must_use]
    pub fn for_product(&self, product_id: &ProductId) -> Vec<&Review> {
        self.reviews
            .iter()
            .filter(|review| &review.product_id == product_id)
            .collect()
    }

    /// Reviews of a product passing `filter`, sorted by `sort`.
    #[must_use]
    pub fn query(
        &self,
        product_id: &ProductId,
        filter: &ReviewFilter,
        sort: ReviewSort,
    ) -> Vec<&Review> {
        let mut found: Vec<&Review> = self
            .reviews
            .iter()
            .filter(|review| &review.product_id == product_id && filter.matches(review))
            .collect();
        sort_reviews(&mut found, sort);
        found
    }

    #[must_use]
    pub fn stats(&self, product_id: &ProductId) -> RatingStats {
        RatingStats::compute(&self.for_product(product_id))
    }

    /// Count one "helpful" vote. Returns `false` for an unknown review.
    pub fn add_helpful_vote(&mut self, id: &ReviewId) -> bool {
        match self.reviews.iter_mut().find(|review| &review.id == id) {
            Some(review) => {
                review.helpful += 1;
                true
            }
            None => false,
        }
    }

    /// Prepend a new review. The rating is clamped to 1..=5.
    pub fn submit(&mut self, review: NewReview) -> ReviewId {
        let id = ReviewId::new(format!("review-{}", uuid::Uuid::new_v4()));
        self.reviews.insert(
            0,
            Review {
                id: id.clone(),
                product_id: review.product_id,
                user_id: review.user_id,
                user_name: review.user_name,
                user_country: review.user_country,
                user_region: review.user_region,
                rating: review.rating.clamp(1, 5),
                title: review.title,
                comment: review.comment,
                images: review.images,
                videos: review.videos,
                verified: review.verified,
                helpful: 0,
                date: Utc::now(),
                reply: None,
            },
        );
        id
    }

    /// Most recent reviews across all products.
    #[must_use]
    pub fn recent(&self, limit: usize) -> Vec<&Review> {
        self.highlight(ReviewSort::Newest, limit)
    }

    /// Highest-rated reviews across all products.
    #[must_use]
    pub fn top_rated(&self, limit: usize) -> Vec<&Review> {
        self.highlight(ReviewSort::RatingHigh, limit)
    }

    fn highlight(&self, sort: ReviewSort, limit: usize) -> Vec<&Review> {
        let mut all: Vec<&Review> = self.reviews.iter().collect();
        sort_reviews(&mut all, sort);
        all.truncate(limit);
        all
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;

    fn fixture() -> ReviewBook {
        let reviews: Vec<Review> = serde_json::from_str(
            r#"[
                {"id":"r1","productId":"p1","userId":"u1","userName":"Ana","userCountry":"Spain",
                 "rating":5,"title":"Great","comment":"Love it","images":["a.jpg"],"videos":[],
                 "verified":true,"helpful":3,"date":"2026-01-10"},
                {"id":"r2","productId":"p1","userId":"u2","userName":"Ben","userCountry":"France",
                 "rating":4,"title":"Good","comment":"Nice","verified":false,"helpful":9,
                 "date":"2026-02-01T10:00:00Z"},
                {"id":"r3","productId":"p1","userId":"u3","userName":"Cy","userCountry":"france",
                 "rating":4,"title":"Ok","comment":"Fine","verified":true,"helpful":0,
                 "date":"2025-12-24"},
                {"id":"r4","productId":"p2","userId":"u4","userName":"Di","userCountry":"Italy",
                 "rating":1,"title":"Bad","comment":"Too small","verified":true,"helpful":1,
                 "date":"2026-03-01"}
            ]"#,
        )
        .unwrap();
        ReviewBook::new(reviews)
    }

    fn ids(reviews: &[&Review]) -> Vec<String> {
        reviews.iter().map(|r| r.id.to_string()).collect()
    }

    #[test]
    fn test_stats() {
        let book = fixture();
        let stats = book.stats(&ProductId::new("p1"));
        assert_eq!(stats.total, 3);
        assert!((stats.average - 4.3).abs() < f64::EPSILON);
        assert_eq!(stats.count(4), 2);
        assert_eq!(stats.count(5), 1);
        assert_eq!(stats.count(9), 0);
        assert!((stats.percentages[3] - 200.0 / 3.0).abs() < 1e-9);
    }

    #[test]
    fn test_stats_without_reviews() {
        let stats = fixture().stats(&ProductId::new("nope"));
        assert_eq!(stats.total, 0);
        assert!(stats.average.abs() < f64::EPSILON);
        assert_eq!(stats.distribution, [0; 5]);
    }

    #[test]
    fn test_sorts() {
        let book = fixture();
        let p1 = ProductId::new("p1");
        let any = ReviewFilter::default();
        assert_eq!(ids(&book.query(&p1, &any, ReviewSort::Newest)), ["r2", "r1", "r3"]);
        assert_eq!(ids(&book.query(&p1, &any, ReviewSort::Oldest)), ["r3", "r1", "r2"]);
        assert_eq!(ids(&book.query(&p1, &any, ReviewSort::Helpful)), ["r2", "r1", "r3"]);
        assert_eq!(ids(&book.query(&p1, &any, ReviewSort::RatingLow)), ["r2", "r3", "r1"]);
    }

    #[test]
    fn test_filters() {
        let book = fixture();
        let p1 = ProductId::new("p1");
        let french = ReviewFilter {
            country: Some("FRANCE".to_string()),
            ..ReviewFilter::default()
        };
        assert_eq!(book.query(&p1, &french, ReviewSort::Newest).len(), 2);

        let verified_media = ReviewFilter {
            verified_only: true,
            with_media: true,
            ..ReviewFilter::default()
        };
        assert_eq!(ids(&book.query(&p1, &verified_media, ReviewSort::Newest)), ["r1"]);

        let five_stars = ReviewFilter {
            min_rating: Some(5),
            ..ReviewFilter::default()
        };
        assert_eq!(book.query(&p1, &five_stars, ReviewSort::Newest).len(), 1);
    }

    #[test]
    fn test_helpful_vote() {
        let mut book = fixture();
        assert!(book.add_helpful_vote(&ReviewId::new("r3")));
        assert!(!book.add_helpful_vote(&ReviewId::new("ghost")));
        let r3 = book.all().iter().find(|r| r.id.as_str() == "r3").unwrap();
        assert_eq!(r3.helpful, 1);
    }

    #[test]
    fn test_submit_prepends() {
        let mut book = fixture();
        let id = book.submit(NewReview {
            product_id: ProductId::new("p2"),
            user_id: "u9".to_string(),
            user_name: "Eve".to_string(),
            user_country: "Germany".to_string(),
            user_region: String::new(),
            rating: 7,
            title: "Wow".to_string(),
            comment: "Perfect fit".to_string(),
            images: Vec::new(),
            videos: Vec::new(),
            verified: false,
        });

        let first = &book.all()[0];
        assert_eq!(first.id, id);
        assert!(id.as_str().starts_with("review-"));
        assert_eq!(first.helpful, 0);
        assert_eq!(first.rating, 5);
        assert_eq!(ids(&book.recent(DEFAULT_HIGHLIGHT_LIMIT))[0], id.to_string());
    }

    #[test]
    fn test_highlights_respect_limit() {
        let book = fixture();
        assert_eq!(book.recent(2).len(), 2);
        assert_eq!(ids(&book.top_rated(1)), ["r1"]);
        assert_eq!(book.recent(DEFAULT_HIGHLIGHT_LIMIT).len(), 4);
    }
}
