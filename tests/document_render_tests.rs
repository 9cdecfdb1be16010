mod common;

use chrono::NaiveDate;
use lopdf::Document;
use rust_decimal_macros::dec;

use loan_docs_server::documents::{DocumentKind, DocumentRequest, Generator};

fn request(kind: DocumentKind) -> DocumentRequest {
    DocumentRequest {
        kind,
        client_name: "Mario Rossi".to_string(),
        amount: Some(dec!(5000)),
        duration_months: Some(36),
        tan: None,
        taeg: None,
        place: None,
        date: None,
    }
}

#[test]
fn test_missing_assets_do_not_change_pagination() {
    let with_assets = tempfile::tempdir().unwrap();
    common::write_assets(with_assets.path());
    let without_assets = tempfile::tempdir().unwrap();

    let full = common::service_with_assets(with_assets.path());
    let bare = common::service_with_assets(without_assets.path());

    for kind in DocumentKind::ALL {
        let a = full.generate(request(kind)).unwrap();
        let b = bare.generate(request(kind)).unwrap();
        assert_eq!(a.page_count, b.page_count, "{:?}", kind);
        assert!(b.pdf.starts_with(b"%PDF-"));

        let painted: usize = common::page_operations(&b.pdf)
            .iter()
            .map(|ops| common::painted_images(ops).len())
            .sum();
        assert_eq!(painted, 0, "{:?} painted a missing asset", kind);
    }
}

#[test]
fn test_contract_repeats_logo_on_every_page() {
    let dir = tempfile::tempdir().unwrap();
    common::write_assets(dir.path());
    let document = common::service_with_assets(dir.path())
        .generate(request(DocumentKind::Contract))
        .unwrap();

    let pages = common::page_operations(&document.pdf);
    assert!(pages.len() >= 2);
    assert_eq!(pages.len(), document.page_count);
    for ops in &pages {
        assert!(common::painted_images(ops).contains(&"Logo".to_string()));
    }
    let signature_pages = pages
        .iter()
        .filter(|ops| common::painted_images(ops).contains(&"Signature".to_string()))
        .count();
    assert_eq!(signature_pages, 1);
}

#[test]
fn test_card_letter_has_border_on_every_page() {
    let dir = tempfile::tempdir().unwrap();
    let document = common::service_with_assets(dir.path())
        .generate(request(DocumentKind::CardLetter))
        .unwrap();

    for ops in common::page_operations(&document.pdf) {
        assert!(ops.iter().any(|op| op.operator == "re"));
    }
}

#[test]
fn test_contract_prints_place_and_date() {
    let dir = tempfile::tempdir().unwrap();
    let mut contract = request(DocumentKind::Contract);
    contract.place = Some("Torino".to_string());
    contract.date = NaiveDate::from_ymd_opt(2026, 3, 5);

    let document = common::service_with_assets(dir.path())
        .generate(contract)
        .unwrap();
    assert_eq!(document.date, "5 marzo 2026");
    let text = common::shown_text(&document.pdf);
    assert!(common::contains(&text, b"Torino"));
    assert!(common::contains(&text, b"05/03/2026"));
}

#[test]
fn test_document_title_is_recorded() {
    let dir = tempfile::tempdir().unwrap();
    let document = common::service_with_assets(dir.path())
        .generate(request(DocumentKind::GuaranteeLetter))
        .unwrap();

    let pdf = Document::load_mem(&document.pdf).unwrap();
    let info_id = pdf.trailer.get(b"Info").unwrap().as_reference().unwrap();
    let info = pdf.get_object(info_id).unwrap().as_dict().unwrap();
    assert_eq!(
        info.get(b"Title").unwrap().as_str().unwrap(),
        b"Lettera di garanzia"
    );
}

#[test]
fn test_render_application_built_field_by_field() {
    use loan_docs_server::documents::LoanApplication;

    let dir = tempfile::tempdir().unwrap();
    let service = common::service_with_assets(dir.path());

    let mut application = LoanApplication::for_kind(DocumentKind::Contract);
    application.client_name = Some("Mario Rossi".to_string());
    application.amount = Some(dec!(10000));
    application.duration_months = Some(24);
    application.tan = Some(dec!(7.86));
    application.taeg = Some(dec!(8.30));
    application.compute_monthly_payment().unwrap();

    let document = service.render(&application, common::today()).unwrap();
    assert_eq!(document.filename, "Contratto_Mario Rossi.pdf");
    let text = common::shown_text(&document.pdf);
    assert!(common::contains(&text, &common::win_ansi("€ 451.63")));
}
