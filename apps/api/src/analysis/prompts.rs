// All LLM prompt constants for the analysis flow. Pure template substitution:
// replace the `{placeholders}` before sending, no control flow.

/// System prompt that enforces JSON-only output for chart extraction.
pub const JSON_ONLY_SYSTEM: &str = "You are a precise data extraction specialist. \
    You MUST respond with valid JSON only. \
    Do NOT include any text outside the JSON array. \
    Do NOT use markdown code fences. \
    Do NOT include explanations or apologies.";

/// System prompt for the three-part performance analysis.
pub const ANALYSIS_SYSTEM: &str = "You are an expert educational analyst. \
    You produce clear, actionable markdown reports about student performance. \
    Follow the requested heading structure exactly.";

/// The three fixed markdown headings the model is instructed to emit.
/// `sections::split_sections` locates these exact strings in the response.
pub const HEADING_WEAKNESSES: &str = "### 1. Ranked List of Existing Weaknesses";
pub const HEADING_FORECAST: &str = "### 2. Forecast of Future Trouble Spots";
pub const HEADING_STUDY_PLAN: &str = "### 3. Tailored Study Plan";

/// Analysis prompt template. Replace `{work_text}` and `{topics}` before sending.
pub const ANALYSIS_PROMPT_TEMPLATE: &str = r#"Based on the following student work and list of course topics, perform a detailed three-part analysis.

**Part 1: Analyze Existing Weaknesses**
Analyze the provided student work to identify every area of underperformance. Present a ranked list of these topics from weakest to strongest.

**Part 2: Predict Future Challenges**
Using the ranked weakness profile from Part 1 and the full list of target topics, predict which upcoming subjects the student is most likely to struggle with. Provide a prioritized list of these future trouble spots.

**Part 3: Generate a Tailored Study Plan**
Generate a concise and actionable study plan addressing both the current weak areas and the predicted challenges. For each topic in the study plan include, in this order:
1. **Key Concepts to Review:** a bulleted list of the most important concepts.
2. **Recommended Practice Exercises:** types of problems or questions to practice.
3. **Specific Study Questions:** 2-3 targeted questions testing the key concepts.
4. **Resource Links or Summaries:** one relevant, high-quality resource link or a brief topic summary.

Structure your entire output with EXACTLY these three markdown headings:
### 1. Ranked List of Existing Weaknesses
### 2. Forecast of Future Trouble Spots
### 3. Tailored Study Plan

---
**Provided Student Work Content:**
{work_text}
---
**Provided List of Target Topics:**
{topics}
---"#;

/// Chart extraction prompt template. Replace `{work_text}` before sending.
pub const CHART_EXTRACT_PROMPT_TEMPLATE: &str = r#"Read the following text from a student's submitted work (homework, quizzes, exams) and extract structured data points for a progress chart.

For each distinct assignment or topic you can identify, extract:
1. "course": the general subject (e.g., "Calculus", "Algebra", "Spanish").
2. "topic": the specific topic being tested (e.g., "Derivatives", "Factoring").
3. "period": the name of the assignment (e.g., "Homework 1", "Quiz 3", "Mid-term Exam").
4. "score": an estimated numerical score from 0 to 100 based on the content, instructor notes, and correctness of the answers.

Return your findings as a JSON array of objects and nothing else.

Example output format:
[
    {"course": "Algebra", "topic": "Linear Equations", "period": "Homework 1", "score": 95},
    {"course": "Algebra", "topic": "Word Problems", "period": "Quiz 1", "score": 60}
]

---
**Student Work Content to Analyze:**
{work_text}
---"#;

pub fn build_analysis_prompt(work_text: &str, topics: &str) -> String {
    ANALYSIS_PROMPT_TEMPLATE
        .replace("{work_text}", work_text)
        .replace("{topics}", topics)
}

pub fn build_chart_extraction_prompt(work_text: &str) -> String {
    CHART_EXTRACT_PROMPT_TEMPLATE.replace("{work_text}", work_text)
}
