use anyhow::Result;
use async_trait::async_trait;
use nidscan::prelude::*;
use std::sync::Arc;

/// Stands in for the OCR engine: "recognises" the image bytes as UTF-8 text.
struct EchoFactory;
struct EchoRecognizer;

#[async_trait]
impl RecognizerFactory for EchoFactory {
    async fn acquire(&self, _languages: &LanguageSet) -> Result<Box<dyn TextRecognizer>, OcrError> {
        Ok(Box::new(EchoRecognizer))
    }
}

#[async_trait]
impl TextRecognizer for EchoRecognizer {
    async fn recognize(&mut self, input: &OcrInput) -> Result<OcrOutput, OcrError> {
        match input {
            OcrInput::Bytes(data) => Ok(OcrOutput::from_text(String::from_utf8_lossy(data))),
            OcrInput::FilePath(_) => Err(OcrError::InvalidInput("demo reads bytes only".into())),
        }
    }

    async fn terminate(self: Box<Self>) {}
}

#[tokio::main]
async fn main() -> Result<()> {
    let verifier = Verifier::new(Arc::new(EchoFactory), VerifierOptions::default());

    let cards = vec![
        "GOVERNMENT OF THE PEOPLE'S REPUBLIC OF BANGLADESH\nName: JOHN SMITH\nNID No: 1234567890123",
        "নাম: SALMA BEGUM\nDate of Birth 01 Jan 1990\nID NO 8712345678901",
        "blurry photo, nothing legible",
    ];

    for card in cards {
        let mut session = ScanSession::new();
        session.set_full_name("typed by ambassador");

        let status = session.scan(&verifier, &image_from_bytes(card.as_bytes().to_vec())?).await?;
        let draft = session.draft();

        println!("{}", "=".repeat(60));
        println!("Status:     {}", status);
        println!("Full name:  {}", draft.full_name);
        println!("NID number: {}", draft.nid_number);
        if let Some(data) = &draft.nid_data {
            println!("Confidence: {:.0}%", data.match_confidence * 100.0);
        }
        println!();
    }

    Ok(())
}
