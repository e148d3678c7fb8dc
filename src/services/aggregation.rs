use std::collections::HashMap;

use crate::models::{AggregatedSummary, Article, Sentiment};
use crate::services::text::clean_text;

fn overall_label(average_sentiment: f64) -> &'static str {
    if average_sentiment > 0.0 {
        "Positive"
    } else if average_sentiment < 0.0 {
        "Negative"
    } else {
        "Neutral"
    }
}

fn summarize<'a>(articles: impl IntoIterator<Item = &'a Article>) -> AggregatedSummary {
    let mut article_count = 0usize;
    let mut positive_count = 0usize;
    let mut negative_count = 0usize;
    let mut score_sum = 0.0f64;

    for article in articles {
        article_count += 1;
        score_sum += article.sentiment_score;
        match article.sentiment {
            Sentiment::Positive => positive_count += 1,
            Sentiment::Negative => negative_count += 1,
            Sentiment::Neutral => {}
        }
    }

    // Guard the empty case explicitly so the average is 0.0, never NaN.
    let average_sentiment = if article_count > 0 {
        score_sum / article_count as f64
    } else {
        0.0
    };

    AggregatedSummary {
        article_count,
        average_sentiment,
        positive_count,
        negative_count,
        overall_label: overall_label(average_sentiment).to_string(),
    }
}

/// Single summary over all articles of one category.
pub fn aggregate_by_category(articles: &[Article]) -> AggregatedSummary {
    summarize(articles)
}

/// One summary per topic. An article belongs to every topic whose keyword
/// appears as a substring of its cleaned title+description, so an article can
/// count toward several topics independently.
pub fn aggregate_by_topics(
    articles: &[Article],
    topics: &[String],
) -> HashMap<String, AggregatedSummary> {
    let texts: Vec<String> = articles.iter().map(searchable_text).collect();

    topics
        .iter()
        .map(|topic| {
            let matched = articles
                .iter()
                .zip(&texts)
                .filter(|(_, text)| text.contains(topic.as_str()))
                .map(|(article, _)| article);
            (topic.clone(), summarize(matched))
        })
        .collect()
}

fn searchable_text(article: &Article) -> String {
    let combined = match &article.description {
        Some(description) => format!("{} {}", article.title, description),
        None => article.title.clone(),
    };
    clean_text(&combined)
}

#[cfg(test)]
mod tests {
    use super::*;
    use assert_approx_eq::assert_approx_eq;

    fn article(title: &str, sentiment: Sentiment, score: f64) -> Article {
        Article {
            title: title.to_string(),
            description: None,
            source: None,
            url: None,
            published_at: None,
            sentiment,
            score,
            sentiment_score: match sentiment {
                Sentiment::Positive => score,
                Sentiment::Negative => -score,
                Sentiment::Neutral => 0.0,
            },
        }
    }

    #[test]
    fn empty_list_yields_neutral_zeroes() {
        let summary = aggregate_by_category(&[]);
        assert_eq!(summary.article_count, 0);
        assert_approx_eq!(summary.average_sentiment, 0.0);
        assert_eq!(summary.positive_count, 0);
        assert_eq!(summary.negative_count, 0);
        assert_eq!(summary.overall_label, "Neutral");
    }

    #[test]
    fn mixed_articles_average_signed_scores() {
        let articles = vec![
            article("rally", Sentiment::Positive, 0.9),
            article("selloff", Sentiment::Negative, 0.6),
            article("flat", Sentiment::Neutral, 0.8),
        ];
        let summary = aggregate_by_category(&articles);

        assert_eq!(summary.article_count, 3);
        assert_eq!(summary.positive_count, 1);
        assert_eq!(summary.negative_count, 1);
        assert_approx_eq!(summary.average_sentiment, (0.9 - 0.6) / 3.0);
        assert_eq!(summary.overall_label, "Positive");
        assert!(summary.positive_count + summary.negative_count <= summary.article_count);
    }

    #[test]
    fn negative_average_labels_negative() {
        let articles = vec![article("crash", Sentiment::Negative, 0.8)];
        let summary = aggregate_by_category(&articles);
        assert_eq!(summary.overall_label, "Negative");
    }

    #[test]
    fn topics_match_on_cleaned_substring() {
        let articles = vec![
            article("Bitcoin surges past record!", Sentiment::Positive, 0.8),
            article("AI chips in demand", Sentiment::Positive, 0.6),
            article("Rain delays the match", Sentiment::Neutral, 0.5),
        ];
        let topics = vec!["bitcoin".to_string(), "ai".to_string()];

        let aggregated = aggregate_by_topics(&articles, &topics);
        assert_eq!(aggregated["bitcoin"].article_count, 1);
        assert_approx_eq!(aggregated["bitcoin"].average_sentiment, 0.8);
        // Substring matching is deliberate: "ai" also hits "rain".
        assert_eq!(aggregated["ai"].article_count, 2);
    }

    #[test]
    fn article_can_count_toward_multiple_topics() {
        let articles = vec![article(
            "Bitcoin miners adopt AI scheduling",
            Sentiment::Positive,
            0.7,
        )];
        let topics = vec!["bitcoin".to_string(), "ai".to_string()];

        let aggregated = aggregate_by_topics(&articles, &topics);
        assert_eq!(aggregated["bitcoin"].article_count, 1);
        assert_eq!(aggregated["ai"].article_count, 1);
    }

    #[test]
    fn unmatched_topic_gets_empty_summary() {
        let articles = vec![article("local sports roundup", Sentiment::Neutral, 0.5)];
        let topics = vec!["energy".to_string()];

        let aggregated = aggregate_by_topics(&articles, &topics);
        assert_eq!(aggregated["energy"].article_count, 0);
        assert_eq!(aggregated["energy"].overall_label, "Neutral");
    }
}
