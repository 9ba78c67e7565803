//! Bundled sample library
//!
//! Covers every viewer strategy, including a loopback PDF and a file type
//! no viewer recognises.

use chrono::{Duration, TimeZone, Utc};

use crate::document::Document;

pub const SAMPLE_OWNER: &str = "demo-user";

struct Sample {
    id: &'static str,
    title: &'static str,
    description: &'static str,
    filetype: &'static str,
    fileurl: &'static str,
    filesize: u64,
    is_public: bool,
}

const SAMPLES: &[Sample] = &[
    Sample {
        id: "1",
        title: "Introduction to Distributed Systems",
        description: "Lecture notes covering consensus, replication and failure models",
        filetype: "application/pdf",
        fileurl: "https://www.cs.cornell.edu/courses/cs5414/2017fa/notes.pdf",
        filesize: 2_457_600,
        is_public: true,
    },
    Sample {
        id: "2",
        title: "Local Draft Manuscript",
        description: "Work-in-progress manuscript served from the development machine",
        filetype: "application/pdf",
        fileurl: "http://localhost:3000/files/draft.pdf",
        filesize: 845_000,
        is_public: true,
    },
    Sample {
        id: "3",
        title: "Project Proposal Template",
        description: "Word template for research project proposals",
        filetype: "application/vnd.openxmlformats-officedocument.wordprocessingml.document",
        fileurl: "https://calibre-ebook.com/downloads/demos/demo.docx",
        filesize: 120_320,
        is_public: true,
    },
    Sample {
        id: "4",
        title: "Quarterly Budget",
        description: "Department budget spreadsheet with monthly breakdown",
        filetype: "application/vnd.ms-excel",
        fileurl: "https://file-examples.com/storage/fe/2017/02/file_example_XLS_10.xls",
        filesize: 8_704,
        is_public: true,
    },
    Sample {
        id: "5",
        title: "Conference Keynote Slides",
        description: "Slides from the annual engineering keynote",
        filetype: "application/vnd.ms-powerpoint",
        fileurl: "https://file-examples.com/storage/fe/2017/08/file_example_PPT_250kB.ppt",
        filesize: 248_320,
        is_public: true,
    },
    Sample {
        id: "6",
        title: "Campus Map",
        description: "High resolution map of the main campus",
        filetype: "image/png",
        fileurl: "https://upload.wikimedia.org/wikipedia/commons/4/47/PNG_transparency_demonstration_1.png",
        filesize: 226_933,
        is_public: true,
    },
    Sample {
        id: "7",
        title: "Raw Sensor Dump",
        description: "Binary export from the lab sensor array",
        filetype: "application/octet-stream",
        fileurl: "https://files.example.com/sensors/dump.bin",
        filesize: 1_048_576,
        is_public: true,
    },
    Sample {
        id: "8",
        title: "Private Meeting Notes",
        description: "Internal notes, not listed publicly",
        filetype: "text/plain",
        fileurl: "https://files.example.com/notes/meeting.txt",
        filesize: 4_096,
        is_public: false,
    },
];

/// Sample documents; lower ids are newer
pub fn sample_documents() -> Vec<Document> {
    let base = Utc
        .with_ymd_and_hms(2024, 1, 1, 9, 0, 0)
        .single()
        .unwrap_or_else(Utc::now);

    SAMPLES
        .iter()
        .enumerate()
        .map(|(index, sample)| {
            let created_at = base - Duration::days(index as i64);
            Document {
                id: sample.id.to_string(),
                title: sample.title.to_string(),
                description: Some(sample.description.to_string()),
                filetype: sample.filetype.to_string(),
                fileurl: sample.fileurl.to_string(),
                filesize: Some(sample.filesize),
                owner_id: SAMPLE_OWNER.to_string(),
                is_public: sample.is_public,
                created_at,
                updated_at: created_at,
            }
        })
        .collect()
}
