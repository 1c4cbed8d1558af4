//! Prompt builder — turns a [`TutorRequest`] into the text sent to the provider.

use crate::types::TutorRequest;

/// System message for chat-style providers.
pub const SYSTEM_PROMPT: &str = "You are a helpful and knowledgeable AI tutor.";

// ─────────────────────────────────────────────
// Fixed sections
// ─────────────────────────────────────────────

const FORMATTING_RULES: &str = "IMPORTANT FORMATTING REQUIREMENTS:\n\
- Use proper markdown formatting with clear headings (##, ###)\n\
- Put ALL code examples in code blocks using ```language syntax\n\
- Structure your response with clear sections\n\
- Use bullet points and numbered lists where appropriate\n\
- Make the content visually organized and easy to follow\n\
- When helpful for visual learners, include diagrams using ```mermaid syntax\n\
- Use diagrams for: flowcharts, process flows, algorithms, data structures, concepts, etc.\n\
- **MERMAID DIAGRAM SIMPLICITY:** Keep text inside diagrams extremely simple. Use short, single-word labels if possible.\n\
- **AVOID SPECIAL CHARACTERS:** Do NOT use parentheses, quotes, or any special characters inside diagram text. For example, instead of `A[Node (with details)]`, use `A[NodeWithDetails]`. This is critical to prevent rendering errors.";

const DIAGRAM_EXAMPLES: &str = "DIAGRAM EXAMPLES:\n\
- Flowchart: ```mermaid\nflowchart TD\n    A[Start] --> B[Process]\n    B --> C[End]\n```\n\
- Sequence: ```mermaid\nsequenceDiagram\n    A->>B: Message\n    B-->>A: Response\n```\n\
- Mind Map: ```mermaid\nmindmap\n  root((Topic))\n    Branch1\n    Branch2\n```";

const CLOSING: &str =
    "Provide a clear, engaging, and educational response that helps the student learn effectively.";

// ─────────────────────────────────────────────
// Builder
// ─────────────────────────────────────────────

/// Build the full tutoring prompt for `request`.
pub fn build_prompt(request: &TutorRequest) -> String {
    let TutorRequest {
        subject,
        level,
        learning_style,
        language,
        question,
    } = request;

    format!(
        "You are an expert AI tutor. Please provide a comprehensive answer to the following question based on these specifications:\n\
         \n\
         Subject: {subject}\n\
         Level: {level}\n\
         Learning Style: {learning_style}\n\
         Language: {language}\n\
         \n\
         Question: {question}\n\
         \n\
         Please tailor your response to:\n\
         - Match the {level} level of understanding\n\
         - Use a {learning_style} approach to explanation\n\
         - Respond in {language}\n\
         - Focus on the {subject} subject area\n\
         \n\
         {FORMATTING_RULES}\n\
         \n\
         {DIAGRAM_EXAMPLES}\n\
         \n\
         {CLOSING}"
    )
}

// ─────────────────────────────────────────────
// Tests
// ─────────────────────────────────────────────
