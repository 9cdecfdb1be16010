mod common;

use std::sync::Arc;

use loan_docs_server::conversation::InputCollector;
use loan_docs_server::documents::DocumentKind;

#[tokio::test]
async fn test_parallel_sessions_share_one_service() {
    let dir = tempfile::tempdir().unwrap();
    common::write_assets(dir.path());
    let service = Arc::new(common::service_with_assets(dir.path()));

    let handles: Vec<_> = (0..8)
        .map(|i| {
            let service = service.clone();
            tokio::task::spawn_blocking(move || {
                let kind = DocumentKind::ALL[i % DocumentKind::ALL.len()];
                let name = format!("Cliente {}", i);
                let mut chat = InputCollector::new(service);
                let mut script = vec![kind.token(), name.as_str()];
                if kind.needs_loan_terms() {
                    script.extend(["5000", "36", "", ""]);
                }
                let mut document = None;
                for input in script {
                    document = chat.handle(input).document;
                }
                (kind, name, document)
            })
        })
        .collect();

    for handle in handles {
        let (kind, name, document) = handle.await.unwrap();
        let document = document.expect("every session completes");
        assert_eq!(document.kind, kind);
        assert_eq!(
            document.filename,
            format!("{}_{}.pdf", kind.file_prefix(), name)
        );
        assert!(document.pdf.starts_with(b"%PDF-"));
    }
}
