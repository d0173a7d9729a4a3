pub mod extraction; // Report OCR + lab value extraction
