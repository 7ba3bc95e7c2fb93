// All LLM prompt templates for the analyzers.
// Placeholders use `{name}` and are filled by `PromptTemplate::render`.

use crate::llm_client::prompts::PromptTemplate;

/// Role statement for article analysis.
pub const ARTICLE_ANALYSIS_ROLE: &str =
    "You are an AI assistant designed to analyze news articles and determine their truthfulness.";

/// Replace: {headline}, {content}
pub const ARTICLE_ANALYSIS_TEMPLATE: &str = r#"Analyze the following news article and provide a truth score, verdict, red flags, source credibility, fact-check summary, and explanation.

Headline: {headline}
Content: {content}

Return a JSON object with this EXACT schema (no extra fields):
{
  "truthScore": 0.0,
  "verdict": "Unverified",
  "redFlags": ["Sensational wording"],
  "sourceCredibility": 0.0,
  "factCheck": "Summary of fact-checking results",
  "explanation": "Reasons for the truthScore"
}

Field rules:
- truthScore: a number between 0 and 1 indicating the likelihood that the article is accurate, 1 being most accurate.
- verdict: a short verdict such as Likely True, Unverified, or Likely False, based on the truthScore.
- redFlags: suspicious patterns found in the article, such as sensational wording or unverified sources. Use an empty array if there are none.
- sourceCredibility: a number between 0 and 1 indicating the credibility of the source.
- factCheck: a summary of fact-checking results from verified fact-check databases.
- explanation: an explanation of the analysis, including reasons for the truthScore."#;

pub const ARTICLE_ANALYSIS: PromptTemplate = PromptTemplate {
    name: "analyze_news_article",
    role: ARTICLE_ANALYSIS_ROLE,
    template: ARTICLE_ANALYSIS_TEMPLATE,
};

pub const CONTENT_INTEGRITY_ROLE: &str = "You are an expert content integrity analyst.";

/// Replace: {headline}, {content}
pub const CONTENT_INTEGRITY_TEMPLATE: &str = r#"Analyze the given news article headline and content for clickbait, emotional exaggeration, and semantic incoherence.

Headline: {headline}
Content: {content}

Return a JSON object with this EXACT schema (no extra fields):
{
  "clickbaitScore": 0.0,
  "emotionalExaggerationScore": 0.0,
  "semanticIncoherenceScore": 0.0,
  "redFlags": ["Emotional manipulation"]
}

Field rules:
- clickbaitScore: 0 to 1, the likelihood of clickbait. Consider sensationalism, misleading information, or overly hyped claims.
- emotionalExaggerationScore: 0 to 1, the level of emotional exaggeration. Consider strong emotional language, hyperbole, or biased sentiment.
- semanticIncoherenceScore: 0 to 1, the degree of semantic incoherence. Consider contradictions, logical fallacies, or inconsistencies.
- redFlags: specific red flags, e.g. "Sensational wording", "Unverified source", "Logical fallacies", "Emotional manipulation".

Scores and red flags must be justified by the content provided."#;

pub const CONTENT_INTEGRITY: PromptTemplate = PromptTemplate {
    name: "assess_content_integrity",
    role: CONTENT_INTEGRITY_ROLE,
    template: CONTENT_INTEGRITY_TEMPLATE,
};

pub const SOURCE_CREDIBILITY_ROLE: &str =
    "You are an AI assistant that assesses the credibility of news sources.";

/// Replace: {source_name}
pub const SOURCE_CREDIBILITY_TEMPLATE: &str = r#"Source Name: {source_name}

Instructions:
1. Consider the source's reputation and historical accuracy record.
2. Evaluate its transparency, fact-checking practices, and potential biases.
3. Assign a credibility score between 0 and 1, where 0 is very low credibility and 1 is very high credibility.
4. Give a reliability verdict (e.g. "Highly Reliable", "Generally Reliable", "Mixed", "Unreliable").
5. List the factors that influenced the assessment (e.g. "Strong fact-checking", "History of bias", "Lack of transparency").

Return a JSON object with this EXACT schema (no extra fields):
{
  "credibilityScore": 0.0,
  "reliabilityVerdict": "Mixed",
  "factors": ["History of bias"]
}"#;

pub const SOURCE_CREDIBILITY: PromptTemplate = PromptTemplate {
    name: "assess_source_credibility",
    role: SOURCE_CREDIBILITY_ROLE,
    template: SOURCE_CREDIBILITY_TEMPLATE,
};

pub const CROSS_CHECK_ROLE: &str =
    "You are an AI assistant specializing in fact-checking news articles.";

/// Replace: {headline}, {content}
pub const CROSS_CHECK_TEMPLATE: &str = r#"Analyze the provided news article, cross-referencing it with what trusted references such as Wikidata and FactCheck.org record, to validate its key entities, claims, and sources.

Identify potential red flags such as sensational wording, unverified sources, or inconsistencies with established facts.

Headline: {headline}
Content: {content}

Return a JSON object with this EXACT schema (no extra fields):
{
  "factCheckResult": "Assessment of the factual accuracy of the content",
  "redFlags": ["Unverified source"],
  "confidenceLevel": 0.0
}

confidenceLevel is a number between 0 and 1 indicating how reliable your assessment is."#;

pub const CROSS_CHECK: PromptTemplate = PromptTemplate {
    name: "cross_check_news_content",
    role: CROSS_CHECK_ROLE,
    template: CROSS_CHECK_TEMPLATE,
};

pub const TRUTH_PROBABILITY_ROLE: &str = "You combine verification scores into a probability.";

/// Replace: {content_analysis_score}, {fact_verification_score}, {source_credibility_score}
pub const TRUTH_PROBABILITY_TEMPLATE: &str = r#"Given the following scores from different verification layers, calculate the overall truth probability score as a percentage. The score must be between 0 and 100.

Content Analysis Score: {content_analysis_score}
Fact Verification Score: {fact_verification_score}
Source Credibility Score: {source_credibility_score}

Each score contributes equally to the overall truth probability.

Return a JSON object with this EXACT schema:
{
  "truthProbabilityScore": 0
}"#;

pub const TRUTH_PROBABILITY: PromptTemplate = PromptTemplate {
    name: "calculate_truth_probability_score",
    role: TRUTH_PROBABILITY_ROLE,
    template: TRUTH_PROBABILITY_TEMPLATE,
};

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_article_template_embeds_input_verbatim() {
        let prompt = ARTICLE_ANALYSIS.render(&[
            ("headline", "NASA Confirms {content} Skeleton"),
            ("content", "Body text."),
        ]);
        assert!(prompt.contains("Headline: NASA Confirms {content} Skeleton"));
        assert!(prompt.contains("Content: Body text."));
        assert!(prompt.contains(r#""truthScore": 0.0"#));
    }

    #[test]
    fn test_every_template_names_its_placeholders() {
        for (template, names) in [
            (&ARTICLE_ANALYSIS, &["{headline}", "{content}"][..]),
            (&CONTENT_INTEGRITY, &["{headline}", "{content}"][..]),
            (&CROSS_CHECK, &["{headline}", "{content}"][..]),
            (&SOURCE_CREDIBILITY, &["{source_name}"][..]),
            (
                &TRUTH_PROBABILITY,
                &[
                    "{content_analysis_score}",
                    "{fact_verification_score}",
                    "{source_credibility_score}",
                ][..],
            ),
        ] {
            for name in names {
                assert!(template.template.contains(name), "{} lacks {name}", template.name);
            }
        }
    }

    #[test]
    fn test_system_prompts_share_json_only_rule() {
        use crate::llm_client::prompts::JSON_ONLY_SYSTEM;

        for template in [
            &ARTICLE_ANALYSIS,
            &CONTENT_INTEGRITY,
            &CROSS_CHECK,
            &SOURCE_CREDIBILITY,
            &TRUTH_PROBABILITY,
        ] {
            let system = template.system_prompt();
            assert!(system.starts_with(template.role), "{}", template.name);
            assert!(system.ends_with(JSON_ONLY_SYSTEM), "{}", template.name);
        }
    }
}
