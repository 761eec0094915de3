use criterion::{black_box, criterion_group, criterion_main, Criterion};

use quizforge_core::classify::Classifier;
use quizforge_core::model::{Pipeline, RawBlock};
use quizforge_core::QuestionExtractor;

fn bench_classify(c: &mut Criterion) {
    let mut group = c.benchmark_group("classify");
    let classifier = Classifier::default();

    let lines = [
        "Question 12: Which of the following is correct?",
        "Read the following passage and answer questions 3-5",
        "C. a fairly long option text that goes on for a while",
        "b) a statement that may or may not be true",
        "Some continuation text without any marker at all",
    ];

    for line in lines {
        let name = classifier.classify(line).label();
        group.bench_function(name, |b| b.iter(|| classifier.classify(black_box(line))));
    }

    group.finish();
}

fn bench_extract(c: &mut Criterion) {
    let mut group = c.benchmark_group("extract");
    let extractor = QuestionExtractor::default();

    let small = generate_exam(5);
    let medium = generate_exam(50);
    let large = generate_exam(200);

    group.bench_function("5_questions", |b| {
        b.iter(|| extractor.extract(Pipeline::RichText, black_box(&small)))
    });

    group.bench_function("50_questions", |b| {
        b.iter(|| extractor.extract(Pipeline::RichText, black_box(&medium)))
    });

    group.bench_function("200_questions", |b| {
        b.iter(|| extractor.extract(Pipeline::RichText, black_box(&large)))
    });

    group.bench_function("200_questions_plain", |b| {
        b.iter(|| extractor.extract(Pipeline::PlainText, black_box(&large)))
    });

    group.finish();
}

fn generate_exam(n: usize) -> Vec<RawBlock> {
    let mut blocks = Vec::new();
    for i in 0..n {
        if i % 10 == 0 {
            blocks.push(RawBlock::plain(
                "Read the following passage and answer the questions",
            ));
            blocks.push(RawBlock::plain("A shared passage about something."));
        }
        blocks.push(RawBlock::plain(format!("Question {}: Stem {i}", i + 1)));
        if i % 3 == 0 {
            for (j, letter) in ["a", "b", "c", "d"].into_iter().enumerate() {
                let text = format!("{letter}) statement {j}");
                blocks.push(if j % 2 == 0 {
                    RawBlock::with_emphasis(text, [letter])
                } else {
                    RawBlock::plain(text)
                });
            }
        } else {
            for (j, letter) in ["A", "B", "C", "D"].into_iter().enumerate() {
                let text = format!("{letter}. option {j}");
                blocks.push(if j == i % 4 {
                    RawBlock::with_emphasis(text, [letter])
                } else {
                    RawBlock::plain(text)
                });
            }
        }
    }
    blocks
}

criterion_group!(benches, bench_classify, bench_extract);
criterion_main!(benches);
