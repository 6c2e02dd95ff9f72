//! Knowledge store records

use crate::core::error::DomainError;
use serde::{Deserialize, Serialize};

/// Category of a knowledge record
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "UPPERCASE")]
pub enum ContentType {
    /// Prayers and intentions
    Doa,
    /// Places in Makkah, Madinah and surroundings
    Location,
    Faq,
    /// Operational information from the travel agent
    Info,
}

impl ContentType {
    pub fn as_str(&self) -> &'static str {
        match self {
            ContentType::Doa => "DOA",
            ContentType::Location => "LOCATION",
            ContentType::Faq => "FAQ",
            ContentType::Info => "INFO",
        }
    }
}

impl std::str::FromStr for ContentType {
    type Err = DomainError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_ascii_uppercase().as_str() {
            "DOA" => Ok(ContentType::Doa),
            "LOCATION" => Ok(ContentType::Location),
            "FAQ" => Ok(ContentType::Faq),
            "INFO" => Ok(ContentType::Info),
            other => Err(DomainError::UnknownContentType(other.to_string())),
        }
    }
}

impl std::fmt::Display for ContentType {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// A question/answer/keyword record in the knowledge store
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct KnowledgeRecord {
    /// Store-assigned identifier (0 until persisted)
    pub id: i64,
    pub content_type: ContentType,
    pub question: String,
    pub answer: String,
    /// Comma-separated search keywords
    pub keywords: String,
    pub is_active: bool,
}

impl KnowledgeRecord {
    pub fn new(
        content_type: ContentType,
        question: impl Into<String>,
        answer: impl Into<String>,
        keywords: impl Into<String>,
    ) -> Self {
        Self {
            id: 0,
            content_type,
            question: question.into(),
            answer: answer.into(),
            keywords: keywords.into(),
            is_active: true,
        }
    }

    pub fn with_id(mut self, id: i64) -> Self {
        self.id = id;
        self
    }

    pub fn inactive(mut self) -> Self {
        self.is_active = false;
        self
    }
}

/// Starter content for a fresh knowledge store.
pub fn sample_records() -> Vec<KnowledgeRecord> {
    vec![
        KnowledgeRecord::new(
            ContentType::Doa,
            "Bagaimana niat ihram untuk umrah?",
            "Niat ihram untuk umrah:\n\nلَبَّيْكَ اللَّهُمَّ عُمْرَةً\n\nLabbaikallahumma umratan\n\nArtinya: \"Aku penuhi panggilan-Mu ya Allah untuk umrah\"",
            "niat,ihram,umrah,labbaik",
        ),
        KnowledgeRecord::new(
            ContentType::Doa,
            "Apa doa masuk Masjidil Haram?",
            "Doa masuk Masjidil Haram:\n\nبِسْمِ اللهِ وَالصَّلاَةُ وَالسَّلاَمُ عَلَى رَسُوْلِ اللهِ، اللَّهُمَّ افْتَحْ لِيْ أَبْوَابَ رَحْمَتِكَ\n\nArtinya: \"Dengan nama Allah, shalawat dan salam kepada Rasulullah. Ya Allah, bukakanlah untukku pintu-pintu rahmat-Mu\"",
            "doa,masuk,masjidil haram,masjid",
        ),
        KnowledgeRecord::new(
            ContentType::Location,
            "Dimana lokasi Jabal Rahmah?",
            "Jabal Rahmah (Bukit Kasih Sayang) terletak di Padang Arafah, sekitar 20 km dari Makkah.\n\nIni adalah tempat bertemunya Nabi Adam dan Hawa setelah diturunkan ke bumi. Lokasi ini menjadi salah satu tempat mustajab untuk berdoa, terutama saat wukuf di Arafah.",
            "jabal rahmah,arafah,lokasi,bukit",
        ),
        KnowledgeRecord::new(
            ContentType::Faq,
            "Apa saja yang membatalkan ihram?",
            "Yang membatalkan ihram:\n\n1. Mencukur atau mencabut rambut\n2. Memotong kuku\n3. Memakai wangi-wangian\n4. Berburu binatang darat\n5. Menikah atau menikahkan\n6. Berhubungan suami istri\n7. Bagi pria: memakai pakaian berjahit, menutup kepala\n8. Bagi wanita: memakai cadar dan sarung tangan",
            "batal,ihram,larangan,haram",
        ),
        KnowledgeRecord::new(
            ContentType::Info,
            "Bagaimana jadwal manasik?",
            "Jadwal manasik akan diinformasikan oleh travel agent Anda. Biasanya manasik dilakukan 2-4 kali sebelum keberangkatan.\n\nSilakan hubungi travel agent untuk jadwal lengkap.",
            "jadwal,manasik,latihan",
        ),
    ]
}
