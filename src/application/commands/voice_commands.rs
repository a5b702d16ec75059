//! Voice Commands

/// 上传的音频附件
#[derive(Debug, Clone)]
pub struct AudioAttachment {
    /// 原始文件名
    pub file_name: String,
    /// 声明的 MIME 类型
    pub mime_type: String,
    pub data: Vec<u8>,
}

/// 克隆音色命令
#[derive(Debug, Clone)]
pub struct CloneVoice {
    /// 医生姓名（音色显示名称）
    pub display_name: String,
    pub description: Option<String>,
    pub audio: Option<AudioAttachment>,
}

/// 删除音色命令
#[derive(Debug, Clone)]
pub struct DeleteVoice {
    pub voice_id: String,
}
