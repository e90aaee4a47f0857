//! Built-in example bank of question, reference and candidate triples.

use serde::Serialize;

use crate::grading::GradeRequest;
use crate::similarity::SimilarityMethod;

/// One named grading example.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct ExampleEntry {
    pub name: &'static str,
    pub question: &'static str,
    pub reference: &'static str,
    pub candidate: &'static str,
}

impl ExampleEntry {
    /// Builds a grade request for this example, carrying the question along.
    pub fn to_request(&self, method: SimilarityMethod) -> GradeRequest {
        GradeRequest::new(self.reference, self.candidate, method).with_question(self.question)
    }
}

pub const EXAMPLES: &[ExampleEntry] = &[
    ExampleEntry {
        name: "Hypertension Diagnosis",
        question: "What criteria are used to diagnose hypertension?",
        reference: "Hypertension is diagnosed when blood pressure readings are consistently above 130/80 mmHg on at least two separate occasions.",
        candidate: "High blood pressure is diagnosed if it stays above 130 over 80 multiple times.",
    },
    ExampleEntry {
        name: "Diabetes Management",
        question: "How is type 2 diabetes managed?",
        reference: "Management includes lifestyle changes like diet and exercise, along with medications such as metformin.",
        candidate: "Patients take metformin and try to eat better and exercise.",
    },
    ExampleEntry {
        name: "Red Blood Cells",
        question: "What is the main function of red blood cells?",
        reference: "Red blood cells carry oxygen from the lungs to tissues throughout the body. They use hemoglobin to bind oxygen.",
        candidate: "They transport oxygen using hemoglobin.",
    },
    ExampleEntry {
        name: "Insulin Functionality",
        question: "How does insulin regulate blood sugar?",
        reference: "Insulin lowers blood glucose by helping cells absorb sugar from the bloodstream. It stimulates the liver to store glucose as glycogen. This keeps blood sugar levels within a healthy range.",
        candidate: "Insulin helps cells absorb glucose. It also stores sugar in the liver.",
    },
    ExampleEntry {
        name: "Allergic Reaction",
        question: "What happens during an allergic reaction?",
        reference: "The immune system identifies a harmless substance as a threat. It releases histamine and other chemicals. This causes symptoms like swelling, itching, and sneezing.",
        candidate: "Histamines are released. You get symptoms like hives or sneezing.",
    },
    ExampleEntry {
        name: "Vaccination",
        question: "What is the purpose of a vaccine?",
        reference: "Vaccines help the immune system recognize and fight specific pathogens.",
        candidate: "Vaccines train the body to fight infections. They don’t actually cause the disease.",
    },
    ExampleEntry {
        name: "Antibiotics Functionality",
        question: "How do antibiotics work?",
        reference: "Antibiotics target bacteria and either kill them or prevent them from multiplying. They interfere with bacterial cell walls or proteins. They are not effective against viruses.",
        candidate: "They kill bacteria but don’t work on viruses.",
    },
];

/// Looks up an example by name, ignoring ASCII case and surrounding whitespace.
pub fn find_example(name: &str) -> Option<&'static ExampleEntry> {
    let name = name.trim();
    EXAMPLES
        .iter()
        .find(|entry| entry.name.eq_ignore_ascii_case(name))
}

/// Example names in bank order.
pub fn example_names() -> impl Iterator<Item = &'static str> {
    EXAMPLES.iter().map(|entry| entry.name)
}
