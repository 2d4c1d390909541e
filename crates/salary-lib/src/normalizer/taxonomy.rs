//! Role to skill recommendation taxonomy
//!
//! Recommendations are chosen in two passes over the lowercased job title:
//! 1. known role keys, in table order, matched by substring containment
//! 2. a fixed cascade of heuristic keyword checks
//!
//! The first match of either pass wins. The cascade order matters: the
//! broad "engineer" rule sits last so that ML and data engineering titles
//! are caught by their specific rules first.

use serde::Serialize;

/// Skill lists attached to a role
#[derive(Debug)]
pub struct SkillSet {
    pub core: &'static [&'static str],
    pub advanced: &'static [&'static str],
    pub tools: &'static [&'static str],
}

/// Recommended skills for a job title
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct SkillRecommendation {
    pub core: Vec<String>,
    pub advanced: Vec<String>,
    pub tools: Vec<String>,
}

impl SkillRecommendation {
    pub fn is_empty(&self) -> bool {
        self.core.is_empty() && self.advanced.is_empty() && self.tools.is_empty()
    }
}

impl From<&SkillSet> for SkillRecommendation {
    fn from(set: &SkillSet) -> Self {
        let owned = |items: &[&str]| items.iter().map(|s| s.to_string()).collect();
        Self {
            core: owned(set.core),
            advanced: owned(set.advanced),
            tools: owned(set.tools),
        }
    }
}

pub const DATA_SCIENTIST: SkillSet = SkillSet {
    core: &["Python", "Machine Learning", "Statistics", "SQL", "Pandas"],
    advanced: &["Deep Learning", "NLP", "Time Series Analysis", "Bayesian Methods"],
    tools: &["Jupyter", "Scikit-learn", "TensorFlow", "Tableau"],
};

pub const ML_ENGINEER: SkillSet = SkillSet {
    core: &["Python", "Machine Learning", "TensorFlow", "PyTorch", "Docker"],
    advanced: &["MLOps", "Kubernetes", "Model Deployment", "Distributed Training"],
    tools: &["MLflow", "Kubeflow", "AWS SageMaker", "Git"],
};

pub const DATA_ENGINEER: SkillSet = SkillSet {
    core: &["Python", "SQL", "Apache Spark", "ETL", "Data Modeling"],
    advanced: &["Apache Kafka", "Airflow", "Data Warehousing", "Stream Processing"],
    tools: &["Databricks", "Snowflake", "dbt", "AWS"],
};

pub const DATA_ANALYST: SkillSet = SkillSet {
    core: &["SQL", "Excel", "Python", "Data Visualization", "Statistics"],
    advanced: &["A/B Testing", "Predictive Modeling", "R"],
    tools: &["Tableau", "Power BI", "Looker", "Google Analytics"],
};

pub const AI_RESEARCHER: SkillSet = SkillSet {
    core: &["Python", "Deep Learning", "PyTorch", "Mathematics", "Research"],
    advanced: &["Reinforcement Learning", "Generative Models", "NLP", "Computer Vision"],
    tools: &["JAX", "Weights & Biases", "LaTeX", "CUDA"],
};

pub const AI_ENGINEER: SkillSet = SkillSet {
    core: &["Python", "Machine Learning", "Deep Learning", "LLMs", "REST APIs"],
    advanced: &["Prompt Engineering", "RAG", "Fine-tuning", "Vector Databases"],
    tools: &["LangChain", "Hugging Face", "OpenAI API", "Docker"],
};

pub const COMPUTER_VISION_ENGINEER: SkillSet = SkillSet {
    core: &["Python", "Computer Vision", "Deep Learning", "OpenCV", "PyTorch"],
    advanced: &["Object Detection", "Image Segmentation", "3D Vision"],
    tools: &["CUDA", "TensorRT", "Docker"],
};

pub const NLP_ENGINEER: SkillSet = SkillSet {
    core: &["Python", "NLP", "Deep Learning", "Transformers", "PyTorch"],
    advanced: &["LLMs", "Information Extraction", "Text Classification"],
    tools: &["Hugging Face", "spaCy", "NLTK"],
};

pub const MLOPS_ENGINEER: SkillSet = SkillSet {
    core: &["Python", "Docker", "Kubernetes", "CI/CD", "Machine Learning"],
    advanced: &["Model Monitoring", "Feature Stores", "Infrastructure as Code"],
    tools: &["MLflow", "Terraform", "Prometheus", "AWS"],
};

pub const BI_ANALYST: SkillSet = SkillSet {
    core: &["SQL", "Data Visualization", "Excel", "Business Intelligence", "Data Modeling"],
    advanced: &["Dashboard Design", "KPI Definition", "Data Warehousing"],
    tools: &["Power BI", "Tableau", "Looker"],
};

pub const PRODUCT_MANAGER: SkillSet = SkillSet {
    core: &["Product Strategy", "Data Analysis", "Roadmapping", "Stakeholder Management", "SQL"],
    advanced: &["A/B Testing", "Machine Learning", "User Research"],
    tools: &["Jira", "Amplitude", "Figma"],
};

pub const DEVOPS_ENGINEER: SkillSet = SkillSet {
    core: &["Linux", "Docker", "Kubernetes", "CI/CD", "Python"],
    advanced: &["Infrastructure as Code", "Observability", "Site Reliability"],
    tools: &["Terraform", "Prometheus", "GitHub Actions", "AWS"],
};

pub const SOFTWARE_ENGINEER: SkillSet = SkillSet {
    core: &["Python", "Java", "Git", "SQL", "Data Structures"],
    advanced: &["System Design", "Microservices", "Cloud Architecture"],
    tools: &["Docker", "Jira", "VS Code"],
};

/// Known role keys, matched in this order against the lowercased title
pub const ROLE_TAXONOMY: &[(&str, &SkillSet)] = &[
    ("data scientist", &DATA_SCIENTIST),
    ("ml engineer", &ML_ENGINEER),
    ("machine learning engineer", &ML_ENGINEER),
    ("mlops engineer", &MLOPS_ENGINEER),
    ("data engineer", &DATA_ENGINEER),
    ("data analyst", &DATA_ANALYST),
    ("ai researcher", &AI_RESEARCHER),
    ("research scientist", &AI_RESEARCHER),
    ("ai engineer", &AI_ENGINEER),
    ("computer vision engineer", &COMPUTER_VISION_ENGINEER),
    ("nlp engineer", &NLP_ENGINEER),
    ("business intelligence analyst", &BI_ANALYST),
    ("product manager", &PRODUCT_MANAGER),
    ("devops engineer", &DEVOPS_ENGINEER),
    ("software engineer", &SOFTWARE_ENGINEER),
];

type TitlePredicate = fn(&str) -> bool;

/// Heuristic fallback rules, evaluated in order after the role keys miss
pub const HEURISTIC_CASCADE: &[(TitlePredicate, &SkillSet)] = &[
    (|t| t.contains("scientist"), &DATA_SCIENTIST),
    (
        |t| t.contains("engineer") && (t.contains("ml") || t.contains("machine learning")),
        &ML_ENGINEER,
    ),
    (|t| t.contains("engineer") && t.contains("data"), &DATA_ENGINEER),
    (|t| t.contains("vision"), &COMPUTER_VISION_ENGINEER),
    (|t| t.contains("nlp") || t.contains("language"), &NLP_ENGINEER),
    (|t| t.contains("business intelligence") || t.contains("bi "), &BI_ANALYST),
    (|t| t.contains("analyst") || t.contains("analytics"), &DATA_ANALYST),
    (|t| t.contains("research"), &AI_RESEARCHER),
    (|t| t.contains("product"), &PRODUCT_MANAGER),
    (
        |t| t.contains("devops") || t.contains("platform") || t.contains("infrastructure"),
        &DEVOPS_ENGINEER,
    ),
    (|t| t.contains("engineer") || t.contains("developer"), &SOFTWARE_ENGINEER),
];

/// Find the skill set for a job title, if any rule matches
pub fn match_skill_set(job_title: &str) -> Option<&'static SkillSet> {
    let title = job_title.to_lowercase();

    ROLE_TAXONOMY
        .iter()
        .find(|(key, _)| title.contains(key))
        .map(|(_, set)| *set)
        .or_else(|| {
            HEURISTIC_CASCADE
                .iter()
                .find(|(matches, _)| matches(&title))
                .map(|(_, set)| *set)
        })
}

/// Recommend core, advanced and tool skills for a free-text job title.
///
/// Returns three empty lists when nothing matches.
pub fn recommend_skills(job_title: &str) -> SkillRecommendation {
    match_skill_set(job_title)
        .map(SkillRecommendation::from)
        .unwrap_or_default()
}
