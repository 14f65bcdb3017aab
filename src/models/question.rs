//! Quiz question models

/// One yes/no question of the appeal quiz
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct QuizStep {
    pub question: &'static str,
    pub hint: &'static str,
    pub yes_label: &'static str,
    pub no_label: &'static str,
}

/// The three questions, asked in order
pub static QUIZ_STEPS: [QuizStep; 3] = [
    QuizStep {
        question: "Have you received the notice of penalty for this infraction?",
        hint: "The notice of penalty comes after the notice of infraction and states the fine amount.",
        yes_label: "Yes, I received the penalty",
        no_label: "No, only the notice of infraction",
    },
    QuizStep {
        question: "Have you already filed a prior defense or a JARI appeal?",
        hint: "JARI is the administrative board that judges first instance appeals.",
        yes_label: "Yes, I already filed",
        no_label: "No, not yet",
    },
    QuizStep {
        question: "Did the JARI deny your appeal?",
        hint: "The decision is sent by mail or published by the traffic authority.",
        yes_label: "Yes, it was denied",
        no_label: "I don't know",
    },
];
