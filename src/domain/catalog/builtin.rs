//! The built-in founder diagnostic questionnaire (q1..q12).

use super::Question;

pub(super) fn founder_diagnostic() -> Vec<Question> {
    vec![
        Question::text(
            "q1",
            "What is the single biggest challenge your company is currently facing?",
        )
        .with_placeholder("e.g., Market saturation, funding, team morale...")
        .with_affirmation("Got it — thank you for sharing that insight."),
        Question::single_choice(
            "q2",
            "How confident are you in your current product-market fit?",
            [
                "Very Confident",
                "Moderately Confident",
                "Slightly Confident",
                "Not Confident",
            ],
        )
        .with_affirmation("Understood. Confidence is key!"),
        Question::text("q3", "Describe your primary customer acquisition channel.")
            .with_placeholder("e.g., Organic search, paid ads, referrals...")
            .with_affirmation("Excellent. Knowing your channels is crucial."),
        Question::single_choice(
            "q4",
            "On a scale of 1-5, how aligned is your team with the company's long-term vision?",
            [
                "1 - Not Aligned",
                "2 - Somewhat Aligned",
                "3 - Moderately Aligned",
                "4 - Well Aligned",
                "5 - Perfectly Aligned",
            ],
        )
        .with_affirmation("Team alignment is so important!"),
        Question::text("q5", "What is your biggest operational bottleneck right now?")
            .with_placeholder(
                "e.g., Slow development, inefficient sales process, customer support...",
            )
            .with_affirmation("Thanks for pinpointing that."),
        Question::single_choice(
            "q6",
            "How effectively do you delegate tasks to your team?",
            [
                "Very Effectively",
                "Moderately Effectively",
                "Sometimes Effectively",
                "Not Effectively At All",
            ],
        )
        .with_affirmation("Delegation can be tricky, but powerful."),
        Question::text(
            "q7",
            "What's one thing you wish you had more clarity on regarding your business?",
        )
        .with_placeholder("e.g., Next growth strategy, market trends, competitor moves...")
        .with_affirmation("That's a common founder thought!"),
        Question::single_choice(
            "q8",
            "How often do you review your company's key performance indicators (KPIs)?",
            ["Daily", "Weekly", "Monthly", "Quarterly", "Rarely"],
        )
        .with_affirmation("Keeping an eye on the numbers is smart."),
        Question::text(
            "q9",
            "What's your current biggest personal challenge as a founder?",
        )
        .with_placeholder("e.g., Work-life balance, decision fatigue, imposter syndrome...")
        .with_affirmation("It's okay to admit the personal struggles."),
        Question::text(
            "q10",
            "How would you describe your company culture in three words?",
        )
        .with_placeholder("e.g., Innovative, collaborative, fast-paced...")
        .with_affirmation("Culture is everything!"),
        Question::single_choice(
            "q11",
            "Do you have a clear, documented 12-month strategic plan?",
            [
                "Yes, it's very clear",
                "Yes, but it needs refinement",
                "Partially, it's in my head",
                "No, not yet",
            ],
        )
        .with_affirmation("Planning ahead is a superpower."),
        Question::text(
            "q12",
            "What's one thing you're most excited about for your company's future?",
        )
        .with_placeholder("e.g., New product launch, market expansion, team growth...")
        .with_affirmation("Love that enthusiasm! Almost done!"),
    ]
}
