//! Registry Port - 音色与消息的内存注册表
//!
//! 所有操作都是同步的、进程内的；两个集合都保持插入顺序

use crate::domain::message::{GeneratedMessage, MessageId};
use crate::domain::voice::{VoiceId, VoiceIdentity};

/// Registry Port
pub trait RegistryPort: Send + Sync {
    /// 追加音色（同 ID 已存在时替换原记录，保留原位置）
    fn add_voice(&self, voice: VoiceIdentity);

    /// 移除音色，返回被移除的记录
    fn remove_voice(&self, id: &VoiceId) -> Option<VoiceIdentity>;

    /// 按插入顺序列出所有音色
    fn list_voices(&self) -> Vec<VoiceIdentity>;

    /// 按 ID 查找音色
    fn find_voice(&self, id: &VoiceId) -> Option<VoiceIdentity>;

    /// 查找音色显示名称，不存在时返回占位名称，永不失败
    fn find_voice_name(&self, id: &VoiceId) -> String;

    /// 追加消息
    fn add_message(&self, message: GeneratedMessage);

    /// 按插入顺序列出所有消息
    fn list_messages(&self) -> Vec<GeneratedMessage>;

    /// 按 ID 查找消息
    fn find_message(&self, id: MessageId) -> Option<GeneratedMessage>;
}
