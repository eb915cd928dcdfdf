//! Static descriptions of common XMP properties.

use super::value::XmpValueType;

#[derive(Debug, Clone, Copy)]
pub struct PropertyInfo {
    pub prefix: &'static str,
    pub name: &'static str,
    pub title: &'static str,
    pub description: &'static str,
    /// Type as written in the schema, such as `bag Text` or `Lang Alt`
    pub xmp_type: &'static str,
    pub value_type: XmpValueType,
}

pub fn property(prefix: &str, name: &str) -> Option<&'static PropertyInfo> {
    PROPERTIES
        .iter()
        .find(|p| p.prefix == prefix && p.name == name)
}

const fn p(
    prefix: &'static str,
    name: &'static str,
    title: &'static str,
    xmp_type: &'static str,
    value_type: XmpValueType,
    description: &'static str,
) -> PropertyInfo {
    PropertyInfo {
        prefix,
        name,
        title,
        description,
        xmp_type,
        value_type,
    }
}

use XmpValueType::{LangAlt, XmpAlt, XmpBag, XmpSeq, XmpText};

#[rustfmt::skip]
static PROPERTIES: &[PropertyInfo] = &[
    // Dublin Core
    p("dc", "contributor", "Contributor", "bag ProperName", XmpBag,
        "Contributors to the resource (other than the authors)."),
    p("dc", "coverage", "Coverage", "Text", XmpText,
        "The spatial or temporal topic of the resource."),
    p("dc", "creator", "Creator", "seq ProperName", XmpSeq,
        "The authors of the resource, listed in order of precedence."),
    p("dc", "date", "Date", "seq Date", XmpSeq,
        "Dates associated with events in the life cycle of the resource."),
    p("dc", "description", "Description", "Lang Alt", LangAlt,
        "A textual description of the content of the resource."),
    p("dc", "format", "Format", "MIMEType", XmpText,
        "The file format used when saving the resource."),
    p("dc", "identifier", "Identifier", "Text", XmpText,
        "Unique identifier of the resource."),
    p("dc", "language", "Language", "bag Locale", XmpBag,
        "Languages used in the content of the resource."),
    p("dc", "publisher", "Publisher", "bag ProperName", XmpBag,
        "Publishers."),
    p("dc", "relation", "Relation", "bag Text", XmpBag,
        "Relationships to other documents."),
    p("dc", "rights", "Rights", "Lang Alt", LangAlt,
        "Informal rights statement, selected by language."),
    p("dc", "source", "Source", "Text", XmpText,
        "Unique identifier of the work from which this resource was derived."),
    p("dc", "subject", "Subject", "bag Text", XmpBag,
        "Descriptive phrases or keywords that specify the topic of the content."),
    p("dc", "title", "Title", "Lang Alt", LangAlt,
        "The title of the document, or the name given to the resource."),
    p("dc", "type", "Type", "bag open Choice", XmpBag,
        "A document type; for example, novel, poem, or working paper."),
    // XMP basic
    p("xmp", "Advisory", "Advisory", "bag XPath", XmpBag,
        "Properties that were edited outside the authoring application."),
    p("xmp", "BaseURL", "Base URL", "URL", XmpText,
        "The base URL for relative URLs in the document content."),
    p("xmp", "CreateDate", "Create Date", "Date", XmpText,
        "The date and time the resource was originally created."),
    p("xmp", "CreatorTool", "Creator Tool", "AgentName", XmpText,
        "The name of the first known tool used to create the resource."),
    p("xmp", "Identifier", "Identifier", "bag Text", XmpBag,
        "An unordered array of text strings that identify the resource."),
    p("xmp", "Label", "Label", "Text", XmpText,
        "A word or short phrase that identifies a document as a member of a user-defined collection."),
    p("xmp", "MetadataDate", "Metadata Date", "Date", XmpText,
        "The date and time that any metadata for this resource was last changed."),
    p("xmp", "ModifyDate", "Modify Date", "Date", XmpText,
        "The date and time the resource was last modified."),
    p("xmp", "Nickname", "Nickname", "Text", XmpText,
        "A short informal name for the resource."),
    p("xmp", "Rating", "Rating", "Closed Choice of Integer", XmpText,
        "A number that indicates a document's status relative to other documents."),
    // XMP rights management
    p("xmpRights", "Certificate", "Certificate", "URL", XmpText,
        "Online rights management certificate."),
    p("xmpRights", "Marked", "Marked", "Boolean", XmpText,
        "Indicates that this is a rights-managed resource."),
    p("xmpRights", "Owner", "Owner", "bag ProperName", XmpBag,
        "An unordered array specifying the legal owners of the resource."),
    p("xmpRights", "UsageTerms", "Usage Terms", "Lang Alt", LangAlt,
        "Text instructions on how the resource can be legally used."),
    p("xmpRights", "WebStatement", "Web Statement", "URL", XmpText,
        "The location of a web page describing the owner and usage rights."),
    // XMP media management
    p("xmpMM", "DocumentID", "Document ID", "URI", XmpText,
        "The common identifier for all versions and renditions of a resource."),
    p("xmpMM", "InstanceID", "Instance ID", "URI", XmpText,
        "An identifier for a specific incarnation of a resource."),
    p("xmpMM", "OriginalDocumentID", "Original Document ID", "URI", XmpText,
        "The common identifier of the original resource from which this one is derived."),
    p("xmpMM", "History", "History", "seq ResourceEvent", XmpSeq,
        "An ordered array of high-level user actions that resulted in this resource."),
    // Photoshop
    p("photoshop", "AuthorsPosition", "Authors Position", "Text", XmpText,
        "By-line title."),
    p("photoshop", "CaptionWriter", "Caption Writer", "ProperName", XmpText,
        "Writer/editor."),
    p("photoshop", "Category", "Category", "Text", XmpText,
        "Category. Limited to 3 7-bit ASCII characters."),
    p("photoshop", "City", "City", "Text", XmpText, "City."),
    p("photoshop", "Country", "Country", "Text", XmpText, "Country/primary location."),
    p("photoshop", "Credit", "Credit", "Text", XmpText, "Credit."),
    p("photoshop", "DateCreated", "Date Created", "Date", XmpText,
        "The date the intellectual content of the document was created."),
    p("photoshop", "Headline", "Headline", "Text", XmpText, "Headline."),
    p("photoshop", "Instructions", "Instructions", "Text", XmpText,
        "Special instructions."),
    p("photoshop", "Source", "Source", "Text", XmpText, "Source."),
    p("photoshop", "State", "State", "Text", XmpText, "Province/state."),
    p("photoshop", "SupplementalCategories", "Supplemental Categories", "bag Text", XmpBag,
        "Supplemental category."),
    p("photoshop", "TransmissionReference", "Transmission Reference", "Text", XmpText,
        "Original transmission reference."),
    p("photoshop", "Urgency", "Urgency", "Integer", XmpText, "Urgency. Valid range is 1-8."),
    // TIFF
    p("tiff", "ImageWidth", "Image Width", "Integer", XmpText, "Image width in pixels."),
    p("tiff", "ImageLength", "Image Length", "Integer", XmpText, "Image height in pixels."),
    p("tiff", "Orientation", "Orientation", "Closed Choice of Integer", XmpText,
        "Orientation of the image."),
    p("tiff", "Make", "Make", "ProperName", XmpText,
        "Manufacturer of recording equipment."),
    p("tiff", "Model", "Model", "ProperName", XmpText,
        "Model name or number of equipment."),
    p("tiff", "Software", "Software", "AgentName", XmpText,
        "Software or firmware used to generate the image."),
    p("tiff", "DateTime", "Date and Time", "Date", XmpText,
        "Date and time the image was last modified."),
    p("tiff", "Artist", "Artist", "ProperName", XmpText, "Camera owner or photographer."),
    p("tiff", "ImageDescription", "Image Description", "Lang Alt", LangAlt,
        "Title of the image."),
    p("tiff", "Copyright", "Copyright", "Lang Alt", LangAlt, "Copyright information."),
    // Exif
    p("exif", "DateTimeOriginal", "Date and Time Original", "Date", XmpText,
        "Date and time when the original image was generated."),
    p("exif", "DateTimeDigitized", "Date and Time Digitized", "Date", XmpText,
        "Date and time when the image was stored as digital data."),
    p("exif", "ExposureTime", "Exposure Time", "Rational", XmpText,
        "Exposure time in seconds."),
    p("exif", "FNumber", "F Number", "Rational", XmpText, "F number."),
    p("exif", "ISOSpeedRatings", "ISO Speed Ratings", "seq Integer", XmpSeq,
        "ISO Speed and ISO Latitude of the input device."),
    p("exif", "PixelXDimension", "Pixel X Dimension", "Integer", XmpText,
        "Valid image width, in pixels."),
    p("exif", "PixelYDimension", "Pixel Y Dimension", "Integer", XmpText,
        "Valid image height, in pixels."),
    p("exif", "UserComment", "User Comment", "Lang Alt", LangAlt,
        "Comments from user."),
    p("exif", "GPSLatitude", "GPS Latitude", "GPSCoordinate", XmpText,
        "GPS latitude as degrees and decimal minutes."),
    p("exif", "GPSLongitude", "GPS Longitude", "GPSCoordinate", XmpText,
        "GPS longitude as degrees and decimal minutes."),
    // IPTC Core
    p("iptc", "CountryCode", "Country Code", "closed Choice of Text", XmpText,
        "Code of the country the content is focussing on."),
    p("iptc", "IntellectualGenre", "Intellectual Genre", "Text", XmpText,
        "Describes the nature, intellectual or journalistic characteristic of an item."),
    p("iptc", "Location", "Location", "Text", XmpText,
        "Name of a sublocation the content is focussing on."),
    p("iptc", "Scene", "IPTC Scene", "bag closed Choice of Text", XmpBag,
        "Describes the scene of a photo content."),
    p("iptc", "SubjectCode", "IPTC Subject Code", "bag closed Choice of Text", XmpBag,
        "Specifies one or more subjects from the IPTC Subject-NewsCodes taxonomy."),
    // Other vocabularies
    p("lr", "hierarchicalSubject", "Hierarchical Subject", "bag Text", XmpBag,
        "Adobe Lightroom hierarchical keywords."),
    p("digiKam", "TagsList", "Tags List", "seq Text", XmpSeq,
        "The list of complete tags path as string."),
    p("MicrosoftPhoto", "LastKeywordXMP", "Last Keyword XMP", "bag Text", XmpBag,
        "Microsoft Photo keywords."),
    p("xmpTPg", "NPages", "Number of Pages", "Integer", XmpText,
        "The number of pages in the document."),
    p("xmpDM", "album", "Album", "Text", XmpText,
        "The name of the album."),
    p("pdf", "Keywords", "Keywords", "Text", XmpText, "Keywords."),
    p("pdf", "Producer", "Producer", "AgentName", XmpText,
        "The name of the tool that created the PDF document."),
    p("plus", "Licensee", "Licensee", "seq Licensee", XmpSeq,
        "Party or parties to whom the license is granted."),
    p("xmpBJ", "JobRef", "Job Reference", "bag Job", XmpBag,
        "References an external job management file."),
    p("crs", "Version", "Version", "Text", XmpText, "Version of Camera Raw."),
    p("aux", "Lens", "Lens", "Text", XmpText, "A description of the lens."),
    p("xmp", "Thumbnails", "Thumbnails", "alt Thumbnail", XmpAlt,
        "An alternative array of thumbnail images for a file."),
];
