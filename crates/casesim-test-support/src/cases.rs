//! Case document fixtures.
//!
//! `THREE_STAGE_*` describe the same case in both formats: three stages of
//! three options each, where option 0 is always correct.

/// Three-stage case, JSON.
pub const THREE_STAGE_JSON: &str = r#"{
  "id": "three-doors",
  "title": "Three Doors",
  "summary": "Pick the safe door three times.",
  "stages": [
    {
      "info": "A hallway with three doors.",
      "question": "Which door do you open?",
      "options": [
        "The green door",
        {"label": "The red door", "feedback": "Red means danger."},
        "The black door"
      ],
      "correct": 0,
      "feedback_wrong": "Look for the safe colour.",
      "next_info": "The green door leads to a stairwell."
    },
    {
      "info": "The stairwell splits in three.",
      "question": "Which way?",
      "options": ["Up", "Down", "Stay"],
      "correct": 0,
      "feedback_wrong": "The exit is on the roof.",
      "next_info": "You reach the roof."
    },
    {
      "info": "A helicopter lands on the roof.",
      "question": "What now?",
      "options": ["Board it", "Wave it away", "Hide"],
      "correct": 0
    }
  ]
}"#;

/// Three-stage case, YAML.
pub const THREE_STAGE_YAML: &str = r"
id: three-doors
title: Three Doors
summary: Pick the safe door three times.
stages:
  - info: A hallway with three doors.
    question: Which door do you open?
    options:
      - The green door
      - label: The red door
        feedback: Red means danger.
      - The black door
    correct: 0
    feedback_wrong: Look for the safe colour.
    next_info: The green door leads to a stairwell.
  - info: The stairwell splits in three.
    question: Which way?
    options: [Up, Down, Stay]
    correct: 0
    feedback_wrong: The exit is on the roof.
    next_info: You reach the roof.
  - info: A helicopter lands on the roof.
    question: What now?
    options: [Board it, Wave it away, Hide]
    correct: 0
";

/// Single-stage case whose only stage has two options, option 1 correct.
pub const SINGLE_STAGE_JSON: &str = r#"{
  "id": "one-step",
  "title": "One Step",
  "stages": [
    {"question": "Ready?", "options": ["No", "Yes"], "correct": 1}
  ]
}"#;

/// Case whose second stage points `correct` past its options.
pub const OUT_OF_RANGE_JSON: &str = r#"{
  "title": "Broken",
  "stages": [
    {"info": "fine", "options": ["a"], "correct": 0},
    {"info": "broken", "options": ["a", "b"], "correct": 5}
  ]
}"#;
