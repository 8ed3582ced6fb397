use std::error::Error;
use std::io;

use tfst_locate::{
    AmbiguousOutputPolicy, MatchPolicy, SearchLimit, SentenceTags, Session, StepKey, TagRef,
    TagSpan, TextPosition,
};

fn pos(token: u32, character: u32) -> TextPosition {
    TextPosition::new(token, character, 0)
}

/// Scripted search over "the round table": the grammar reads the whole
/// noun phrase twice, analyzing "round" once as an adjective and once as a
/// noun. The shared steps are recorded once; the two readings surface as
/// ambiguous outputs over one span.
fn main() -> Result<(), Box<dyn Error>> {
    tracing_subscriber::fmt()
        .with_env_filter(tracing_subscriber::EnvFilter::from_default_env())
        .init();

    let mut sentence = SentenceTags::new(0);
    let the = sentence.push(TagSpan::new(pos(0, 0), pos(0, 3)));
    let round = sentence.push(TagSpan::new(pos(1, 0), pos(1, 5)));
    let table = sentence.push(TagSpan::new(pos(2, 0), pos(2, 5)));

    let mut session = Session::new(
        io::stdout().lock(),
        MatchPolicy::Longest,
        AmbiguousOutputPolicy::Allow,
        SearchLimit::Unbounded,
    );
    let mut search = session.begin_sentence(sentence);

    let walk = |search: &mut tfst_locate::SentenceSearch| {
        let first = search.record_step(StepKey::new(0, 1, 0, -1), TagRef::Tag(the));
        let second = search.record_step(StepKey::new(1, 2, 1, -1), TagRef::Tag(round));
        search.link(second, Some(first));
        let head = search.record_step(StepKey::new(2, 3, 2, -1), TagRef::Tag(table));
        search.link(head, Some(second));
        head
    };

    let head = walk(&mut search);
    search.complete(head, Some("DET ADJ N"))?;
    // The second reading re-walks the same transitions: no new steps.
    let head = walk(&mut search);
    search.complete(head, Some("DET N N"))?;

    session.finish_sentence(search)?;
    Ok(())
}
