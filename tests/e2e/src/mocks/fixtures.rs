//! Test Data Factory
//!
//! Provides utilities for generating realistic test data:
//! - Records of every type with the fields the scorer reads
//! - Batch generation for stress testing
//! - Pre-built scenarios for common test cases

use collabup_core::{RecordType, Storage};
use serde_json::{json, Value};

/// Factory for creating test data
///
/// # Example
///
/// ```rust,ignore
/// let storage = Storage::new(Some(path))?;
///
/// // Load the campus scenario
/// let scenario = TestDataFactory::campus_scenario();
/// TestDataFactory::seed(&storage, &scenario);
///
/// // Or add filler records
/// let ids = TestDataFactory::create_batch(&storage, RecordType::MentorProfiles, 100);
/// ```
pub struct TestDataFactory;

/// Documents to load, per record type, in insertion order
#[derive(Debug, Clone, Default)]
pub struct Scenario {
    pub records: Vec<(RecordType, Vec<Value>)>,
}

impl Scenario {
    /// Documents of one type
    pub fn documents(&self, record_type: RecordType) -> &[Value] {
        self.records
            .iter()
            .find(|(t, _)| *t == record_type)
            .map(|(_, docs)| docs.as_slice())
            .unwrap_or(&[])
    }

    /// Total number of documents
    pub fn len(&self) -> usize {
        self.records.iter().map(|(_, docs)| docs.len()).sum()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}

impl TestDataFactory {
    // ========================================================================
    // SINGLE RECORDS
    // ========================================================================

    pub fn student_project(id: &str, title: &str, domain: &str, skills: &[&str]) -> Value {
        json!({
            "id": id,
            "title": title,
            "description": format!("{} project built by students", title),
            "domain": domain,
            "difficulty": "Intermediate",
            "skillsRequired": skills,
        })
    }

    pub fn startup(id: &str, name: &str, domain: &str, location: &str) -> Value {
        json!({
            "id": id,
            "name": name,
            "description": format!("{} startup", domain),
            "domain": domain,
            "location": location,
        })
    }

    pub fn mentor(id: &str, name: &str, company: &str, expertise: &[&str]) -> Value {
        json!({
            "id": id,
            "name": name,
            "currentCompany": company,
            "designation": "Engineer",
            "expertise": expertise,
        })
    }

    pub fn faculty(id: &str, name: &str, institute: &str, areas: &[&str]) -> Value {
        json!({
            "id": id,
            "name": name,
            "department": "Computer Science",
            "institute": institute,
            "researchAreas": areas,
        })
    }

    // ========================================================================
    // SCENARIOS
    // ========================================================================

    /// A small campus: three projects, three startups, two mentors, two faculty
    pub fn campus_scenario() -> Scenario {
        let projects = vec![
            json!({
                "id": "p1",
                "title": "AI Crop Doctor",
                "description": "Detect plant diseases from leaf photos using deep learning",
                "domain": "Agritech",
                "difficulty": "Advanced",
                "type": "Research",
                "skillsRequired": ["Python", "TensorFlow", "Computer Vision"]
            }),
            json!({
                "id": "p2",
                "title": "Campus Marketplace",
                "description": "Buy and sell used textbooks within the college",
                "domain": "E-commerce",
                "difficulty": "Beginner",
                "type": "Web App",
                "skillsRequired": ["React", "Node.js", "MongoDB"]
            }),
            json!({
                "id": "p3",
                "title": "UPI Expense Splitter",
                "description": "Split bills among hostel roommates",
                "domain": "Fintech",
                "difficulty": "Intermediate",
                "type": "Mobile App",
                "skillsRequired": ["Flutter", "Firebase"]
            }),
        ];

        let startups = vec![
            json!({
                "id": "s1",
                "name": "KisanLink",
                "description": "Connecting farmers directly to buyers",
                "domain": "Agritech",
                "location": "Pune",
                "mission": "Fair prices for every farmer",
                "founder": "Ritu Sharma",
                "funding": "Seed"
            }),
            json!({
                "id": "s2",
                "name": "PaySetu",
                "description": "Payment rails for small merchants",
                "domain": "Fintech",
                "location": "Bangalore",
                "mission": "Make digital payments effortless",
                "founder": "Arjun Rao",
                "funding": "Series A"
            }),
            json!({
                "id": "s3",
                "name": "MedIQ",
                "description": "Python based triage assistant for clinics",
                "domain": "Healthtech",
                "location": "Hyderabad",
                "mission": "Faster diagnosis in rural clinics",
                "founder": "Sana Khan",
                "funding": "Pre-seed"
            }),
        ];

        let mentors = vec![
            json!({
                "id": "m1",
                "name": "Anita Desai",
                "bio": "Built data platforms at scale",
                "currentCompany": "Google",
                "designation": "Staff Engineer",
                "experience": 12,
                "expertise": ["Python", "Distributed Systems", "Machine Learning"]
            }),
            json!({
                "id": "m2",
                "name": "Vikram Mehta",
                "bio": "Product leader in consumer fintech",
                "currentCompany": "Razorpay",
                "designation": "Product Director",
                "experience": 9,
                "expertise": ["Product Management", "Fintech"]
            }),
        ];

        let faculty = vec![
            json!({
                "id": "f1",
                "name": "Dr. Meera Iyer",
                "bio": "Works on robust perception for autonomous vehicles",
                "department": "Computer Science",
                "institute": "IIT Bombay",
                "designation": "Associate Professor",
                "experience": 15,
                "researchAreas": ["Computer Vision", "Robotics"]
            }),
            json!({
                "id": "f2",
                "name": "Dr. Rahul Nair",
                "bio": "Studies incentive design in markets",
                "department": "Economics",
                "institute": "IISc Bangalore",
                "designation": "Professor",
                "experience": 20,
                "researchAreas": ["Game Theory", "Fintech"]
            }),
        ];

        Scenario {
            records: vec![
                (RecordType::StudentProjects, projects),
                (RecordType::StartupProjects, startups),
                (RecordType::MentorProfiles, mentors),
                (RecordType::ResearchProjects, faculty),
            ],
        }
    }

    /// Identical startups, so every query scores them equally
    pub fn tie_scenario(count: usize) -> Scenario {
        let startups = (0..count)
            .map(|i| Self::startup(&format!("tie-{}", i), "Same Name", "Edtech", "Mumbai"))
            .collect();
        Scenario {
            records: vec![(RecordType::StartupProjects, startups)],
        }
    }

    // ========================================================================
    // LOADING
    // ========================================================================

    /// Load a scenario, returning the number of records stored
    pub fn seed(storage: &Storage, scenario: &Scenario) -> usize {
        scenario
            .records
            .iter()
            .map(|(record_type, docs)| {
                storage
                    .import_records(*record_type, docs.clone())
                    .expect("Failed to seed scenario")
            })
            .sum()
    }

    /// Insert `count` filler records of one type, returning their ids
    pub fn create_batch(storage: &Storage, record_type: RecordType, count: usize) -> Vec<String> {
        const DOMAINS: [&str; 4] = ["Edtech", "Cleantech", "Logistics", "Gaming"];
        const SKILLS: [&str; 4] = ["Rust", "Go", "Kotlin", "Swift"];

        (0..count)
            .map(|i| {
                let id = format!("{}-{}", record_type.collection(), i);
                let domain = DOMAINS[i % DOMAINS.len()];
                let skill = SKILLS[i % SKILLS.len()];
                let doc = match record_type {
                    RecordType::StudentProjects => {
                        Self::student_project(&id, &format!("Project {}", i), domain, &[skill])
                    }
                    RecordType::StartupProjects => {
                        Self::startup(&id, &format!("Venture {}", i), domain, "Chennai")
                    }
                    RecordType::MentorProfiles => {
                        Self::mentor(&id, &format!("Mentor {}", i), "Infosys", &[skill])
                    }
                    RecordType::ResearchProjects => {
                        Self::faculty(&id, &format!("Prof. {}", i), "NIT Trichy", &[domain])
                    }
                };
                storage
                    .insert_record(record_type, None, doc)
                    .expect("Failed to insert batch record")
            })
            .collect()
    }
}
