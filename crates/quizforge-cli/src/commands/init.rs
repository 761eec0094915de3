//! The `quizforge init` command.

use std::path::Path;

use anyhow::Result;

pub fn execute() -> Result<()> {
    write_if_missing(Path::new("quizforge.toml"), SAMPLE_CONFIG)?;

    std::fs::create_dir_all("samples")?;
    write_if_missing(Path::new("samples/exam.html"), SAMPLE_EXAM)?;

    println!("\nNext steps:");
    println!("  1. Edit quizforge.toml to match your exam wording");
    println!("  2. Run: quizforge classify --input samples/exam.html");
    println!("  3. Run: quizforge extract --input samples/exam.html --format table");

    Ok(())
}

fn write_if_missing(path: &Path, content: &str) -> Result<()> {
    if path.exists() {
        println!("{} already exists, skipping.", path.display());
    } else {
        std::fs::write(path, content)?;
        println!("Created {}", path.display());
    }
    Ok(())
}

const SAMPLE_CONFIG: &str = r#"# quizforge configuration

# Words that open a question line, followed by a number and ':' or '.'
question_keywords = ["Question", "Item", "Câu", "Bài"]

# Case-insensitive patterns announcing a shared reading passage
passage_cues = [
    'read\b.*\banswers?\b.*\bquestions?',
    'đọc thông tin.*trả lời.*câu hỏi',
]

# "sequential" (q_1, q_2, ...) or "timestamped"
id_scheme = "sequential"

# id_prefix = "exam"

# Attach a passage to every question up to the next passage
share_passage = false
"#;

const SAMPLE_EXAM: &str = r#"<!DOCTYPE html>
<html>
<head><title>Sample exam</title></head>
<body>
<h1>Sample exam</h1>
<p>Question 1: What is 2 + 2?</p>
<p>A. 3</p>
<p><u>B</u>. 4</p>
<p>C. 5</p>
<p>D. 22</p>
<p>Read the following text and answer questions 2 and 3.</p>
<p>Rust was first released in 2015. Its compiler checks ownership at build time.</p>
<p>Question 2: When was Rust first released?</p>
<p>A. 2010</p>
<p>B. 2012</p>
<p><u>C</u>. 2015</p>
<p>D. 2018</p>
<p>Question 3: Decide whether each statement is true or false.</p>
<p><u>a</u>) The compiler checks ownership.</p>
<p>b) Rust was released in 2010.</p>
<p><u>c</u>) Ownership is checked at build time.</p>
<p>d) Rust has no compiler.</p>
</body>
</html>
"#;
