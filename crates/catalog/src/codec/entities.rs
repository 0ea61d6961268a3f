use super::{Decode, Encode, ObjectReader, ObjectWriter};
use crate::error::Result;
use crate::models::{Catalog, Chapter, Episode, Links, Part, RecordingUnit};

impl Encode for RecordingUnit {
    fn encode_into(&self, object: &mut ObjectWriter) {
        object
            .optional("titel", self.title.clone())
            .optional("autor", self.author.clone())
            .optional("hörspielskriptautor", self.script_author.clone())
            .optional("beschreibung", self.description.clone())
            .optional("veröffentlichungsdatum", self.release_date.clone())
            .sequence("kapitel", self.chapters.as_deref())
            .optional("sprecher", self.speakers.clone().filter(|groups| !groups.is_empty()))
            .nested("links", self.links.as_ref());
    }
}
impl Decode for RecordingUnit {
    const ENTITY: &'static str = "recording unit";
    fn decode_from(object: &mut ObjectReader) -> Result<Self> {
        Ok(Self {
            title: object.optional_string("titel")?,
            author: object.optional_string("autor")?,
            script_author: object.optional_string("hörspielskriptautor")?,
            description: object.optional_string("beschreibung")?,
            release_date: object.optional_string("veröffentlichungsdatum")?,
            chapters: object.optional_sequence("kapitel")?,
            speakers: object.optional_string_groups("sprecher")?,
            links: object.optional_nested("links")?,
        })
    }
}

impl Encode for Episode {
    fn encode_into(&self, object: &mut ObjectWriter) {
        object.field("nummer", self.number()).sequence("teile", self.parts.as_deref());
        self.unit.encode_into(object);
    }
}
impl Decode for Episode {
    const ENTITY: &'static str = "episode";
    fn decode_from(object: &mut ObjectReader) -> Result<Self> {
        let number = object.required_u32("nummer")?;
        let parts = object.optional_sequence("teile")?;
        let mut episode = Episode::with_unit(number, RecordingUnit::decode_from(object)?);
        episode.parts = parts;
        Ok(episode)
    }
}

impl Encode for Part {
    fn encode_into(&self, object: &mut ObjectWriter) {
        object.field("teilNummer", self.number()).optional("buchstabe", self.letter.clone());
        self.unit.encode_into(object);
    }
}
impl Decode for Part {
    const ENTITY: &'static str = "part";
    fn decode_from(object: &mut ObjectReader) -> Result<Self> {
        let number = object.required_u32("teilNummer")?;
        let letter = object.optional_string("buchstabe")?;
        let mut part = Part::with_unit(number, RecordingUnit::decode_from(object)?);
        part.letter = letter;
        Ok(part)
    }
}

impl Encode for Chapter {
    fn encode_into(&self, object: &mut ObjectWriter) {
        object
            .field("titel", self.title())
            .optional("start", self.start())
            .optional("end", self.end());
    }
}
impl Decode for Chapter {
    const ENTITY: &'static str = "chapter";
    fn decode_from(object: &mut ObjectReader) -> Result<Self> {
        Ok(Chapter::new(
            object.required_string("titel")?,
            object.optional_i64("start")?,
            object.optional_i64("end")?,
        ))
    }
}

impl Encode for Links {
    fn encode_into(&self, object: &mut ObjectWriter) {
        object
            .optional("json", self.json.clone())
            .optional("ffmetadata", self.ffmetadata.clone())
            .optional("xld_log", self.xld_log.clone())
            .optional("cover", self.cover.clone())
            .optional("cover_itunes", self.cover_itunes.clone())
            .optional("cover_kosmos", self.cover_kosmos.clone());
    }
}
impl Decode for Links {
    const ENTITY: &'static str = "links";
    fn decode_from(object: &mut ObjectReader) -> Result<Self> {
        Ok(Self {
            json: object.optional_string("json")?,
            ffmetadata: object.optional_string("ffmetadata")?,
            xld_log: object.optional_string("xld_log")?,
            cover: object.optional_string("cover")?,
            cover_itunes: object.optional_string("cover_itunes")?,
            cover_kosmos: object.optional_string("cover_kosmos")?,
        })
    }
}

impl Encode for Catalog {
    fn encode_into(&self, object: &mut ObjectWriter) {
        object
            .sequence("serie", Some(self.series.as_slice()))
            .sequence("spezial", self.specials.as_deref())
            .sequence("kurzgeschichten", self.short_stories.as_deref())
            .sequence("die_dr3i", self.spinoffs.as_deref());
    }
}
impl Decode for Catalog {
    const ENTITY: &'static str = "catalog";
    fn decode_from(object: &mut ObjectReader) -> Result<Self> {
        Ok(Self {
            series: object.required_sequence("serie")?,
            specials: object.optional_sequence("spezial")?,
            short_stories: object.optional_sequence("kurzgeschichten")?,
            spinoffs: object.optional_sequence("die_dr3i")?,
        })
    }
}
