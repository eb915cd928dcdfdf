//! Static IPTC-IIM dataset tables for the Envelope and Application2 records.

use super::value::IptcType;

pub const ENVELOPE: u16 = 1;
pub const APPLICATION2: u16 = 2;

/// Dataset number of `Iptc.Envelope.CharacterSet`.
pub const CHARACTER_SET: u16 = 90;

/// Static description of one dataset.
#[derive(Debug, Clone, Copy)]
pub struct DatasetInfo {
    pub number: u16,
    pub name: &'static str,
    pub title: &'static str,
    pub description: &'static str,
    pub repeatable: bool,
    pub min_len: usize,
    pub max_len: usize,
    pub value_type: IptcType,
    /// Label used by Photoshop's File Info dialog, if any
    pub photoshop: &'static str,
}

/// Static description of a record.
#[derive(Debug, Clone, Copy)]
pub struct RecordInfo {
    pub number: u16,
    pub name: &'static str,
    pub description: &'static str,
    pub datasets: &'static [DatasetInfo],
}

pub static RECORDS: &[RecordInfo] = &[
    RecordInfo {
        number: ENVELOPE,
        name: "Envelope",
        description: "IIM envelope record",
        datasets: ENVELOPE_DATASETS,
    },
    RecordInfo {
        number: APPLICATION2,
        name: "Application2",
        description: "IIM application record 2",
        datasets: APPLICATION2_DATASETS,
    },
];

pub fn record(number: u16) -> Option<&'static RecordInfo> {
    RECORDS.iter().find(|r| r.number == number)
}

pub fn record_by_name(name: &str) -> Option<&'static RecordInfo> {
    RECORDS.iter().find(|r| r.name == name)
}

pub fn dataset(record_number: u16, number: u16) -> Option<&'static DatasetInfo> {
    record(record_number)?
        .datasets
        .iter()
        .find(|d| d.number == number)
}

#[allow(clippy::too_many_arguments)]
const fn ds(
    number: u16,
    name: &'static str,
    title: &'static str,
    value_type: IptcType,
    repeatable: bool,
    min_len: usize,
    max_len: usize,
    photoshop: &'static str,
    description: &'static str,
) -> DatasetInfo {
    DatasetInfo {
        number,
        name,
        title,
        description,
        repeatable,
        min_len,
        max_len,
        value_type,
        photoshop,
    }
}

use IptcType::{Date, Short, String as Text, Time, Undefined};

#[rustfmt::skip]
static ENVELOPE_DATASETS: &[DatasetInfo] = &[
    ds(0, "ModelVersion", "Model Version", Short, false, 2, 2, "",
        "A binary number identifying the version of the Information Interchange Model."),
    ds(5, "Destination", "Destination", Text, true, 0, 1024, "",
        "Routing information for the envelope."),
    ds(20, "FileFormat", "File Format", Short, false, 2, 2, "",
        "A binary number representing the file format."),
    ds(22, "FileVersion", "File Version", Short, false, 2, 2, "",
        "A binary number representing the version of the file format."),
    ds(30, "ServiceId", "Service Id", Text, false, 0, 10, "",
        "Identifies the provider and product."),
    ds(40, "EnvelopeNumber", "Envelope Number", Text, false, 8, 8, "",
        "The characters form a number that is unique for the date and service."),
    ds(50, "ProductId", "Product Id", Text, true, 0, 32, "",
        "Allows a provider to identify subsets of its overall service."),
    ds(60, "EnvelopePriority", "Envelope Priority", Text, false, 1, 1, "",
        "Specifies the envelope handling priority."),
    ds(70, "DateSent", "Date Sent", Date, false, 8, 8, "",
        "The year, month and day the service sent the material."),
    ds(80, "TimeSent", "Time Sent", Time, false, 11, 11, "",
        "The time the service sent the material."),
    ds(90, "CharacterSet", "Character Set", Undefined, false, 0, 32, "",
        "Control functions used for the announcement, invocation or designation of coded character sets."),
    ds(100, "UNO", "Unique Name Object", Text, false, 14, 80, "",
        "An eternal, globally unique identification for the object."),
    ds(120, "ARMId", "ARM Identifier", Short, false, 2, 2, "",
        "Identifies the Abstract Relationship Method."),
    ds(122, "ARMVersion", "ARM Version", Short, false, 2, 2, "",
        "Identifies the version of the Abstract Relationship Method."),
];

#[rustfmt::skip]
static APPLICATION2_DATASETS: &[DatasetInfo] = &[
    ds(0, "RecordVersion", "Record Version", Short, false, 2, 2, "",
        "A binary number identifying the version of the record."),
    ds(3, "ObjectType", "Object Type", Text, false, 3, 67, "",
        "Distinguishes between different types of objects."),
    ds(4, "ObjectAttribute", "Object Attribute", Text, true, 4, 68, "",
        "Defines the nature of the object independent of the subject."),
    ds(5, "ObjectName", "Object Name", Text, false, 0, 64, "Document Title",
        "A shorthand reference for the object."),
    ds(7, "EditStatus", "Edit Status", Text, false, 0, 64, "",
        "Status of the object data, according to the practice of the provider."),
    ds(8, "EditorialUpdate", "Editorial Update", Text, false, 2, 2, "",
        "Indicates the type of update this object provides to a previous object."),
    ds(10, "Urgency", "Urgency", Text, false, 1, 1, "Urgency",
        "Specifies the editorial urgency of content."),
    ds(12, "Subject", "Subject", Text, true, 13, 236, "",
        "The subject reference."),
    ds(15, "Category", "Category", Text, false, 0, 3, "Category",
        "Identifies the subject of the object data in the opinion of the provider."),
    ds(20, "SuppCategory", "Supplemental Category", Text, true, 0, 32, "Supplemental Categories",
        "Supplemental categories further refine the subject of the object data."),
    ds(22, "FixtureId", "Fixture Id", Text, false, 0, 32, "",
        "Identifies object data that recurs often and predictably."),
    ds(25, "Keywords", "Keywords", Text, true, 0, 64, "Keywords",
        "Keywords to express the subject of the content."),
    ds(26, "LocationCode", "Location Code", Text, true, 3, 3, "",
        "The code of a country or geographical location referenced by the content."),
    ds(27, "LocationName", "Location Name", Text, true, 0, 64, "",
        "The name of a country or geographical location referenced by the content."),
    ds(30, "ReleaseDate", "Release Date", Date, false, 8, 8, "",
        "The earliest date the provider intends the object to be used."),
    ds(35, "ReleaseTime", "Release Time", Time, false, 11, 11, "",
        "The earliest time the provider intends the object to be used."),
    ds(37, "ExpirationDate", "Expiration Date", Date, false, 8, 8, "",
        "The latest date the provider or owner intends the object data to be used."),
    ds(38, "ExpirationTime", "Expiration Time", Time, false, 11, 11, "",
        "The latest time the provider or owner intends the object data to be used."),
    ds(40, "SpecialInstructions", "Special Instructions", Text, false, 0, 256, "Instructions",
        "Any of a number of instructions from the provider or creator to the receiver."),
    ds(42, "ActionAdvised", "Action Advised", Text, false, 2, 2, "",
        "Indicates the type of action that this object provides to a previous object."),
    ds(45, "ReferenceService", "Reference Service", Text, true, 0, 10, "",
        "Identifies the service identifier of a prior envelope."),
    ds(47, "ReferenceDate", "Reference Date", Date, true, 8, 8, "",
        "Identifies the date of a prior envelope."),
    ds(50, "ReferenceNumber", "Reference Number", Text, true, 8, 8, "",
        "Identifies the envelope number of a prior envelope."),
    ds(55, "DateCreated", "Date Created", Date, false, 8, 8, "Date Created",
        "The date the intellectual content of the object data was created."),
    ds(60, "TimeCreated", "Time Created", Time, false, 11, 11, "",
        "The time the intellectual content of the object data was created."),
    ds(62, "DigitizationDate", "Digital Creation Date", Date, false, 8, 8, "",
        "The date the digital representation of the object data was created."),
    ds(63, "DigitizationTime", "Digital Creation Time", Time, false, 11, 11, "",
        "The time the digital representation of the object data was created."),
    ds(65, "Program", "Program", Text, false, 0, 32, "",
        "The type of program used to originate the object data."),
    ds(70, "ProgramVersion", "Program Version", Text, false, 0, 10, "",
        "The version of the program used to originate the object data."),
    ds(75, "ObjectCycle", "Object Cycle", Text, false, 1, 1, "",
        "Where the object is morning, evening or both."),
    ds(80, "Byline", "By-line", Text, true, 0, 32, "Author",
        "The name of the creator of the object."),
    ds(85, "BylineTitle", "By-line Title", Text, true, 0, 32, "Authors Position",
        "The job title of the creator of the object."),
    ds(90, "City", "City", Text, false, 0, 32, "City",
        "The city of the location shown in the content."),
    ds(92, "SubLocation", "Sub Location", Text, false, 0, 32, "",
        "The location within a city shown in the content."),
    ds(95, "ProvinceState", "Province State", Text, false, 0, 32, "State/Province",
        "The province or state of the location shown in the content."),
    ds(100, "CountryCode", "Country Code", Text, false, 3, 3, "",
        "The code of the country of the location shown in the content."),
    ds(101, "CountryName", "Country Name", Text, false, 0, 64, "Country",
        "The name of the country of the location shown in the content."),
    ds(103, "TransmissionReference", "Transmission Reference", Text, false, 0, 32,
        "Transmission Reference", "A code representing the location of original transmission."),
    ds(105, "Headline", "Headline", Text, false, 0, 256, "Headline",
        "A publishable entry providing a synopsis of the contents of the object."),
    ds(110, "Credit", "Credit", Text, false, 0, 32, "Credit",
        "The credit to person(s) or organisation(s) required by the supplier."),
    ds(115, "Source", "Source", Text, false, 0, 32, "Source",
        "The original owner of the intellectual content of the object."),
    ds(116, "Copyright", "Copyright", Text, false, 0, 128, "Copyright notice",
        "Any necessary copyright notice."),
    ds(118, "Contact", "Contact", Text, true, 0, 128, "",
        "The person or organisation which can provide further background information."),
    ds(120, "Caption", "Caption", Text, false, 0, 2000, "Description",
        "A textual description of the object data."),
    ds(122, "Writer", "Writer", Text, true, 0, 32, "Description writer",
        "The name of the person involved in writing the caption."),
    ds(125, "RasterizedCaption", "Rasterized Caption", Undefined, false, 7360, 7360, "",
        "The rasterized caption, for text that cannot be represented in characters."),
    ds(130, "ImageType", "Image Type", Text, false, 2, 2, "",
        "Indicates the color components of an image."),
    ds(131, "ImageOrientation", "Image Orientation", Text, false, 1, 1, "",
        "Indicates the layout of an image."),
    ds(135, "Language", "Language", Text, false, 2, 3, "",
        "The major national language of the object."),
    ds(150, "AudioType", "Audio Type", Text, false, 2, 2, "",
        "Indicates the type of an audio content."),
    ds(151, "AudioRate", "Audio Rate", Text, false, 6, 6, "",
        "The sampling rate in Hertz of an audio content."),
    ds(152, "AudioResolution", "Audio Resolution", Text, false, 2, 2, "",
        "The sampling resolution of an audio content."),
    ds(153, "AudioDuration", "Audio Duration", Text, false, 6, 6, "",
        "The duration of an audio content."),
    ds(154, "AudioOutcue", "Audio Outcue", Text, false, 0, 64, "",
        "The content of the end of an audio object data."),
    ds(200, "PreviewFormat", "Preview Format", Short, false, 2, 2, "",
        "A binary number representing the file format of the object data preview."),
    ds(201, "PreviewVersion", "Preview Version", Short, false, 2, 2, "",
        "A binary number representing the version of the object data preview file format."),
    ds(202, "Preview", "Preview Data", Undefined, false, 0, 256_000, "",
        "Binary image preview data."),
];
