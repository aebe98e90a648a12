//! Review instruction sent to the remote model

/// Fixed instruction; the source text is appended after it
pub const REVIEW_INSTRUCTIONS: &str = r#"As a Java code analysis expert, perform a comprehensive analysis of the following code. Provide detailed, actionable feedback in the following categories:

1. Critical Errors:
   - Syntax errors
   - Runtime risks
   - Logic flaws
   - Compilation issues

2. Warnings:
   - Code style deviations
   - Unused variables/imports
   - Naming conventions
   - Code organization

3. Optimizations:
   - Performance improvements
   - Resource utilization
   - Code readability
   - Maintainability suggestions

4. Security:
   - Vulnerabilities
   - Best practices
   - Security patterns
   - Input validation

Return ONLY a JSON object with this structure:
{
  "criticalErrors": [{
    "type": "string",
    "line": number,
    "description": "string",
    "impact": "string",
    "fixRecommendation": "string",
    "codeExample": "string",
    "priority": "HIGH|MEDIUM|LOW"
  }],
  "warnings": [{
    "type": "string",
    "line": number,
    "description": "string",
    "bestPractice": "string",
    "fixRecommendation": "string",
    "codeExample": "string",
    "priority": "HIGH|MEDIUM|LOW"
  }],
  "optimizations": [{
    "type": "string",
    "description": "string",
    "performance_impact": "string",
    "suggestion": "string",
    "codeExample": "string",
    "priority": "HIGH|MEDIUM|LOW"
  }],
  "security": [{
    "vulnerability": "string",
    "risk_level": "HIGH|MEDIUM|LOW",
    "description": "string",
    "impact": "string",
    "mitigation": "string",
    "secure_code_example": "string"
  }],
  "summary": {
    "total_issues": number,
    "critical_count": number,
    "warning_count": number,
    "optimization_count": number,
    "security_count": number,
    "overall_code_quality": "string"
  }
}

Java code to analyze:
"#;

pub fn build_prompt(source: &str) -> String {
    let mut prompt = String::with_capacity(REVIEW_INSTRUCTIONS.len() + source.len());
    prompt.push_str(REVIEW_INSTRUCTIONS);
    prompt.push_str(source);
    prompt
}
