//! 切分结果的性质测试：与暴力枚举对照，并逐条检查覆盖/长度/合并/去重约束。

use std::collections::{BTreeSet, HashSet};

use pretty_assertions::assert_eq;
use wordsplit_core::{ChunkKind, Dictionary, Engine, Range, Sequence, Text, WordSet};

struct Case {
    words: &'static [&'static str],
    input: &'static str,
    min: usize,
    max: usize,
}

const CASES: &[Case] = &[
    Case { words: &["the", "cat", "sat", "on", "mat"], input: "thecatsatonmat", min: 2, max: 2 },
    Case { words: &["the", "cat", "sat", "on", "mat"], input: "thecatsatonmat", min: 3, max: 3 },
    Case { words: &[], input: "xyz", min: 3, max: 3 },
    Case { words: &[], input: "abcdefg", min: 3, max: 4 },
    Case { words: &["ab"], input: "ab", min: 3, max: 2 },
    Case { words: &[], input: "a!b", min: 3, max: 3 },
    Case { words: &["a", "aa", "aaa"], input: "aaaaaa", min: 1, max: 2 },
    Case { words: &["ab", "ba", "aba", "bab"], input: "abababab", min: 2, max: 3 },
    Case { words: &["cat", "cats", "at", "sat", "s"], input: "catsat", min: 1, max: 2 },
    Case { words: &["no", "now", "here", "where", "ere", "he"], input: "nowhere", min: 2, max: 1 },
    Case { words: &["go", "od", "good", "dog"], input: "good-dog, gooddog", min: 2, max: 2 },
    Case { words: &["über", "all", "ball"], input: "überball", min: 3, max: 2 },
    Case { words: &["x1", "42"], input: "x142x", min: 2, max: 1 },
    Case { words: &["cat"], input: "--cat--", min: 3, max: 0 },
    Case { words: &["cat"], input: "cat!zzzz", min: 3, max: 3 },
    Case { words: &["Cat", "DOG"], input: "catDog", min: 3, max: 0 },
    Case { words: &[], input: "", min: 1, max: 3 },
    Case { words: &[], input: "!?", min: 1, max: 3 },
];

fn engine(case: &Case) -> Engine<WordSet> {
    Engine::new(case.words.iter().collect())
        .min_word_length(case.min)
        .max_non_word_length(case.max)
}

fn kind(dict: &WordSet, text: &Text, range: Range, min: usize) -> ChunkKind {
    if range.len() >= min && dict.contains(&text.slice(range)) {
        ChunkKind::Word
    } else {
        ChunkKind::NonWord
    }
}

/// 所有字母数字段（最大连续段）。
fn spans(text: &Text) -> Vec<Range> {
    let mut out = Vec::new();
    let mut pos = 0;
    while let Some(start) = text.next_alnum(pos) {
        let end = text.span_end(start);
        out.push(Range::new(start, end));
        pos = end;
    }
    out
}

/// 暴力枚举一个段的所有合法分法。
fn chunkings(dict: &WordSet, text: &Text, span: Range, min: usize, max: usize) -> Vec<Vec<Range>> {
    fn go(
        dict: &WordSet,
        text: &Text,
        pos: usize,
        end: usize,
        min: usize,
        max: usize,
        prefix: &mut Vec<Range>,
        out: &mut Vec<Vec<Range>>,
    ) {
        if pos == end {
            out.push(prefix.clone());
            return;
        }
        for next in pos + 1..=end {
            let range = Range::new(pos, next);
            let this = kind(dict, text, range, min);
            if this == ChunkKind::NonWord && range.len() > max {
                continue;
            }
            let prev_non_word = prefix
                .last()
                .is_some_and(|prev| kind(dict, text, *prev, min) == ChunkKind::NonWord);
            if this == ChunkKind::NonWord && prev_non_word {
                continue;
            }
            prefix.push(range);
            go(dict, text, next, end, min, max, prefix, out);
            prefix.pop();
        }
    }

    let mut out = Vec::new();
    go(dict, text, span.start, span.end, min, max, &mut Vec::new(), &mut out);
    out
}

fn brute_force(case: &Case) -> BTreeSet<Vec<Range>> {
    let dict: WordSet = case.words.iter().collect();
    let text = Text::new(case.input);
    let spans = spans(&text);
    if spans.is_empty() {
        return BTreeSet::new();
    }

    let mut acc: Vec<Vec<Range>> = vec![Vec::new()];
    for span in spans {
        let options = chunkings(&dict, &text, span, case.min, case.max);
        acc = acc
            .iter()
            .flat_map(|prefix| {
                options.iter().map(move |option| {
                    let mut seq = prefix.clone();
                    seq.extend(option.iter().copied());
                    seq
                })
            })
            .collect();
    }
    acc.into_iter().collect()
}

fn check_properties(case: &Case, sequences: &[Sequence]) {
    let engine = engine(case);
    let text = Text::new(case.input);
    let spans = spans(&text);

    for seq in sequences {
        // 覆盖：首尾相接，边界处只跳过非字母数字字符
        let covered: Vec<usize> = seq.iter().flat_map(|r| r.start..r.end).collect();
        let expected: Vec<usize> = spans.iter().flat_map(|r| r.start..r.end).collect();
        assert_eq!(covered, expected, "{}: {:?}", case.input, seq);

        let chunks = engine.render(&text, seq);
        for chunk in &chunks {
            assert!(!chunk.range.is_empty());
            match chunk.kind {
                ChunkKind::Word => assert!(chunk.range.len() >= case.min),
                ChunkKind::NonWord => assert!(chunk.range.len() <= case.max),
            }
        }
        for pair in chunks.windows(2) {
            let adjacent = pair[0].range.end == pair[1].range.start;
            let both_non_words = !pair[0].is_word() && !pair[1].is_word();
            assert!(!(adjacent && both_non_words), "{}: {:?}", case.input, seq);
        }
    }

    let unique: HashSet<&Sequence> = sequences.iter().collect();
    assert_eq!(unique.len(), sequences.len(), "duplicate sequence for {}", case.input);
}

#[test]
fn test_matches_brute_force() {
    for case in CASES {
        let actual: Vec<Sequence> = engine(case).split_all(case.input).unwrap();
        check_properties(case, &actual);

        let actual: BTreeSet<Vec<Range>> = actual.into_iter().map(Sequence::into_ranges).collect();
        assert_eq!(actual, brute_force(case), "input {:?}", case.input);
    }
}

#[test]
fn test_stream_yields_same_order() {
    for case in CASES {
        let engine = engine(case).stream_buffer(2);
        let expected = engine.split_all(case.input).unwrap();
        let actual: Vec<Sequence> = engine.stream(case.input).unwrap().collect();
        assert_eq!(actual, expected, "input {:?}", case.input);
    }
}

#[test]
fn test_split_twice_gives_same_result() {
    for case in CASES {
        let engine = engine(case);
        assert_eq!(
            engine.split_all(case.input).unwrap(),
            engine.split_all(case.input).unwrap()
        );
    }
}

#[test]
fn test_known_examples() {
    let case = &CASES[0];
    let text = Text::new(case.input);
    let found: Vec<Vec<String>> = engine(case)
        .split_all(case.input)
        .unwrap()
        .iter()
        .map(|seq| seq.iter().map(|r| text.slice(*r)).collect())
        .collect();
    assert!(found.contains(&["the", "cat", "sat", "on", "mat"].map(String::from).to_vec()));

    let xyz = engine(&CASES[2]).split_all("xyz").unwrap();
    assert_eq!(xyz, vec![Sequence::from(vec![Range::new(0, 3)])]);

    let a_b = engine(&CASES[5]).split_all("a!b").unwrap();
    assert_eq!(
        a_b,
        vec![Sequence::from(vec![Range::new(0, 1), Range::new(2, 3)])]
    );
}

#[test]
fn test_early_termination_is_a_prefix() {
    let case = &CASES[7];
    let engine = engine(case);
    let all = engine.split_all(case.input).unwrap();
    assert!(all.len() > 3);

    let first: Vec<Sequence> = engine.split(case.input).unwrap().take(3).collect();
    assert_eq!(first, all[..3].to_vec());

    let streamed: Vec<Sequence> = engine.stream(case.input).unwrap().take(3).collect();
    assert_eq!(streamed, first);
}

#[test]
fn test_long_input_through_split_and_stream() {
    let engine = Engine::new(["ab"].into_iter().collect::<WordSet>())
        .min_word_length(2)
        .max_non_word_length(0);
    let input = "ab".repeat(20_000);
    let expected = vec![Sequence::from(
        (0..20_000).map(|i| Range::new(2 * i, 2 * i + 2)).collect::<Vec<_>>(),
    )];

    let split: Vec<Sequence> = engine.split(&input).unwrap().collect();
    assert_eq!(split, expected);

    let streamed: Vec<Sequence> = engine.stream(&input).unwrap().collect();
    assert_eq!(streamed, expected);
}
