use std::collections::HashSet;
use thiserror::Error;

pub const CATEGORIES_PER_PUZZLE: usize = 4;
pub const TERMS_PER_CATEGORY: usize = 4;
pub const TERMS_PER_PUZZLE: usize = CATEGORIES_PER_PUZZLE * TERMS_PER_CATEGORY;

pub const WIN_HEADLINE: &str = "You've mapped the structure.";
pub const WIN_BLURB: &str = "These four dimensions work together: How you organize thinking \
determines what AI can learn from you. Better structure = better thought partnership.";

#[derive(Debug, Error, PartialEq, Eq)]
pub enum ContentError {
    #[error("puzzle pack is empty")]
    Empty,
    #[error("puzzle {puzzle_id}: term '{term}' appears more than once")]
    DuplicateTerm { puzzle_id: u32, term: String },
    #[error("puzzle {puzzle_id}: category '{category}' has a blank term")]
    BlankTerm { puzzle_id: u32, category: String },
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Category {
    pub name: String,
    pub description: String,
    pub terms: [String; TERMS_PER_CATEGORY],
}

impl Category {
    pub fn new(name: &str, description: &str, terms: [&str; TERMS_PER_CATEGORY]) -> Self {
        Self {
            name: name.to_string(),
            description: description.to_string(),
            terms: terms.map(str::to_string),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Puzzle {
    pub id: u32,
    pub categories: [Category; CATEGORIES_PER_PUZZLE],
}

impl Puzzle {
    /// Every term paired with the index of the category it belongs to,
    /// in category order.
    pub fn terms(&self) -> impl Iterator<Item = (&str, usize)> {
        self.categories
            .iter()
            .enumerate()
            .flat_map(|(idx, cat)| cat.terms.iter().map(move |t| (t.as_str(), idx)))
    }

    pub fn validate(&self) -> Result<(), ContentError> {
        let mut seen = HashSet::with_capacity(TERMS_PER_PUZZLE);
        for category in &self.categories {
            for term in &category.terms {
                if term.trim().is_empty() {
                    return Err(ContentError::BlankTerm {
                        puzzle_id: self.id,
                        category: category.name.clone(),
                    });
                }
                if !seen.insert(term.as_str()) {
                    return Err(ContentError::DuplicateTerm {
                        puzzle_id: self.id,
                        term: term.clone(),
                    });
                }
            }
        }
        Ok(())
    }
}

pub fn validate_puzzles(puzzles: &[Puzzle]) -> Result<(), ContentError> {
    if puzzles.is_empty() {
        return Err(ContentError::Empty);
    }
    puzzles.iter().try_for_each(Puzzle::validate)
}

/// The puzzle pack shipped with the game.
pub fn embedded_puzzles() -> Vec<Puzzle> {
    vec![
        Puzzle {
            id: 1,
            categories: [
                Category::new(
                    "STRUCTURES FOR THINKING",
                    "Ways to organize thought so it becomes transferable and learnable",
                    ["TAXONOMY", "FRAMEWORK", "SCHEMA", "SYSTEM"],
                ),
                Category::new(
                    "PROBLEM RECOGNITION",
                    "Identifying what's actually being asked beneath surface requests",
                    ["CONSTRAINT", "PATTERN", "TENSION", "ASSUMPTION"],
                ),
                Category::new(
                    "CREATIVE CONSTRAINT",
                    "Limitations that force innovation and clarity",
                    ["SCOPE", "VOICE", "BRAND", "BRIEF"],
                ),
                Category::new(
                    "KNOWLEDGE ARTIFACTS",
                    "What emerges when thinking is structured well",
                    ["NARRATIVE", "BLUEPRINT", "PROMPT", "DATASET"],
                ),
            ],
        },
        Puzzle {
            id: 2,
            categories: [
                Category::new(
                    "AI COLLABORATION INPUTS",
                    "What you need to give AI for it to think like you",
                    ["EXAMPLE", "PRINCIPLE", "CONTEXT", "VOICE"],
                ),
                Category::new(
                    "POSITIONING TOOLS",
                    "Methods for clarifying what makes something distinct",
                    ["CONTRAST", "ATTRIBUTE", "ARCHETYPE", "STORY"],
                ),
                Category::new(
                    "WORKFLOW FRICTION POINTS",
                    "Where human time gets wasted before AI can help",
                    ["REVIEW", "VARIATION", "CONSISTENCY", "TRANSLATION"],
                ),
                Category::new(
                    "THINKING OUTPUTS",
                    "Deliverables that prove clarity has been achieved",
                    ["GUIDELINES", "RUBRIC", "TEMPLATE", "SYSTEM"],
                ),
            ],
        },
        Puzzle {
            id: 3,
            categories: [
                Category::new(
                    "INFORMATION LAYERS",
                    "How to structure complex knowledge hierarchically",
                    ["CATEGORY", "RELATIONSHIP", "METADATA", "HIERARCHY"],
                ),
                Category::new(
                    "STRATEGIC QUESTIONS",
                    "The meta-cognitive prompts that unlock better thinking",
                    ["WHO", "CONSTRAINT", "DIFFERENCE", "OUTCOME"],
                ),
                Category::new(
                    "EXECUTION DISCIPLINES",
                    "Practices that translate thinking into reliable systems",
                    ["ITERATION", "FEEDBACK", "DOCUMENTATION", "TESTING"],
                ),
                Category::new(
                    "MIRROR BUILDING",
                    "Components needed for AI to reflect your actual thinking",
                    ["PREFERENCE", "PATTERN", "EXCEPTION", "EVOLUTION"],
                ),
            ],
        },
    ]
}
