// Prompt templates for the structured parser. Replace `{text}` before sending.

/// Resume mode. Field names must stay in sync with `ParsedResume`.
pub const RESUME_PROMPT_TEMPLATE: &str = r#"You are an expert resume parser. I will give you the raw text of a resume.
Your task is to extract the following fields **accurately**:

- name
- email
- phone
- skills (as an array of strings)
- experience_years (total years of professional experience, a whole number)
- education (highest qualification)
- location (current location, if available)
- linkedin (profile URL, if mentioned)
- github (profile URL, if mentioned)

{json_only} {null_fields}

Example of expected response (just the JSON, nothing else):
{"name": "Jane Doe", "email": "jane.doe@gmail.com", "phone": "+1-234-567-8901", "skills": ["Python", "LangChain", "NLP", "RAG", "LLMs"], "experience_years": 5, "education": "M.Sc. in Computer Science", "location": "Berlin, Germany", "linkedin": "https://linkedin.com/in/janedoe", "github": "https://github.com/janedoe"}

Now here is the resume:
{text}"#;

/// Query mode. Field names must stay in sync with `CandidateFilter`.
pub const QUERY_PROMPT_TEMPLATE: &str = r#"You are an expert technical recruiter. I will give you a recruiter's natural-language search for candidates.
Your task is to turn it into a structured search filter with these fields:

- skills (array of required technologies or skills, each as a short canonical name)
- min_experience_years (minimum years of experience as a whole number, or null)
- location (city, region or country, or null)
- job_title (the role being hired for, or null)
- industry (the industry or domain, or null)

{json_only} {null_fields}

Example of expected response (just the JSON, nothing else):
{"skills": ["Python", "AWS"], "min_experience_years": 5, "location": "London", "job_title": "Backend Engineer", "industry": "Fintech"}

Now here is the search:
{text}"#;
