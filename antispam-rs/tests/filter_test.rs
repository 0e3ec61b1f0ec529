//! Integration tests for the spam filter pipeline

use antispam_rs::classifier::{Corpus, NaiveBayes, Tokenizer};
use antispam_rs::config::FilterConfig;
use antispam_rs::filter::{InboundMessage, LineSource, LogAction, MessageFilter, Verdict};
use antispam_rs::trust::{PersistPolicy, TrustStore};
use std::fs;
use std::path::PathBuf;
use std::sync::Arc;
use tempfile::TempDir;

struct Fixture {
    dir: TempDir,
}

impl Fixture {
    fn new() -> Self {
        let dir = TempDir::new().unwrap();
        fs::write(
            dir.path().join("spam_data.txt"),
            "Buy cheap pills now!\n\
             Free crypto giveaway, click the link\n\
             Earn money fast, click here\n\
             Cheap loans, no questions, click now\n",
        )
        .unwrap();
        fs::write(
            dir.path().join("ham_data.txt"),
            "Hello, how are you?\n\
             See you at the meeting tomorrow\n\
             Thanks for the notes from the lecture\n\
             Does anyone know when the exam starts?\n",
        )
        .unwrap();
        fs::write(dir.path().join("exclude_data.txt"), "the, a,\nan  to").unwrap();
        Fixture { dir }
    }

    fn path(&self, name: &str) -> PathBuf {
        self.dir.path().join(name)
    }

    fn classifier(&self) -> NaiveBayes {
        let corpus = Corpus::load(self.path("spam_data.txt"), self.path("ham_data.txt")).unwrap();
        let mut bayes = NaiveBayes::new(Tokenizer::load(self.path("exclude_data.txt")).unwrap());
        bayes.train(&corpus.messages, &corpus.labels).unwrap();
        bayes
    }

    async fn filter(&self, promote_after: u32) -> MessageFilter {
        let config = FilterConfig {
            min_message_length: 4,
            promote_after,
            persist_policy: PersistPolicy::Strict,
        };
        let trust = TrustStore::load(self.path("white_list.txt"), config.persist_policy)
            .await
            .unwrap();
        MessageFilter::new(Arc::new(self.classifier()), Arc::new(trust), &config)
    }
}

#[test]
fn test_classifier_from_files() {
    let fixture = Fixture::new();
    let bayes = fixture.classifier();

    assert!(bayes.predict("click here for cheap crypto"));
    assert!(!bayes.predict("when is the meeting about the exam?"));
    // Only excluded words left
    assert!(!bayes.predict("The a an to"));
}

#[tokio::test]
async fn test_trust_list_seeds_filter() {
    let fixture = Fixture::new();
    fs::write(fixture.path("white_list.txt"), "42\n99\n").unwrap();
    let filter = fixture.filter(3).await;

    assert!(filter.trust().is_trusted(42).await);
    assert!(!filter.trust().is_trusted(7).await);

    let spam_from_trusted = InboundMessage::text(42, "buy cheap pills now");
    assert_eq!(filter.check(&spam_from_trusted).await, Verdict::Trusted);
}

#[tokio::test]
async fn test_promotion_persists_across_restart() {
    let fixture = Fixture::new();
    let message = InboundMessage::text(5, "thanks, see you at the lecture");

    {
        let filter = fixture.filter(3).await;
        for _ in 0..3 {
            assert!(matches!(filter.check(&message).await, Verdict::Clean { .. }));
        }
        assert!(filter.trust().is_trusted(5).await);
    }

    assert_eq!(fs::read_to_string(fixture.path("white_list.txt")).unwrap(), "5\n");

    let restarted = fixture.filter(3).await;
    assert_eq!(restarted.check(&message).await, Verdict::Trusted);
}

#[tokio::test]
async fn test_run_stdin_format() {
    let fixture = Fixture::new();
    let filter = fixture.filter(2).await;

    let input: &[u8] = b"10 Free crypto giveaway, click here\n\
        11 hello, how are you?\n\
        11 see you tomorrow at the meeting\n\
        11 buy cheap pills now\n\
        not-a-sender hello\n";
    let mut source = LineSource::new(input);

    let stats = filter.run(&mut source, Arc::new(LogAction)).await.unwrap();

    assert_eq!(stats.processed, 4);
    assert!(stats.spam >= 1);
    assert_eq!(stats.failed, 0);
    assert!(filter.trust().is_trusted(11).await);
    assert!(!filter.trust().is_trusted(10).await);
}
