//! Ordinal layout of the `JNINativeInterface` function table.
//!
//! Each entry is the JNI function name paired with the mangled `_JNIEnv`
//! member symbol that C++ callers link against. The first four slots are
//! reserved by the JNI function table and have no symbol.

pub(crate) const SLOT_COUNT: usize = 233;

pub(crate) const SLOTS: [(&str, Option<&str>); SLOT_COUNT] = [
    ("reserved0", None),
    ("reserved1", None),
    ("reserved2", None),
    ("reserved3", None),
    ("GetVersion", Some("_ZN7_JNIEnv10GetVersionEv")),
    ("DefineClass", Some("_ZN7_JNIEnv11DefineClassEPKcP8_jobjectPKai")),
    ("FindClass", Some("_ZN7_JNIEnv9FindClassEPKc")),
    ("FromReflectedMethod", Some("_ZN7_JNIEnv19FromReflectedMethodEP8_jobject")),
    ("FromReflectedField", Some("_ZN7_JNIEnv18FromReflectedFieldEP8_jobject")),
    ("ToReflectedMethod", Some("_ZN7_JNIEnv17ToReflectedMethodEP7_jclassP10_jmethodIDh")),
    ("GetSuperclass", Some("_ZN7_JNIEnv13GetSuperclassEP7_jclass")),
    ("IsAssignableFrom", Some("_ZN7_JNIEnv16IsAssignableFromEP7_jclassS1_")),
    ("ToReflectedField", Some("_ZN7_JNIEnv16ToReflectedFieldEP7_jclassP9_jfieldIDh")),
    ("Throw", Some("_ZN7_JNIEnv5ThrowEP11_jthrowable")),
    ("ThrowNew", Some("_ZN7_JNIEnv8ThrowNewEP7_jclassPKc")),
    ("ExceptionOccurred", Some("_ZN7_JNIEnv17ExceptionOccurredEv")),
    ("ExceptionDescribe", Some("_ZN7_JNIEnv17ExceptionDescribeEv")),
    ("ExceptionClear", Some("_ZN7_JNIEnv14ExceptionClearEv")),
    ("FatalError", Some("_ZN7_JNIEnv10FatalErrorEPKc")),
    ("PushLocalFrame", Some("_ZN7_JNIEnv14PushLocalFrameEi")),
    ("PopLocalFrame", Some("_ZN7_JNIEnv13PopLocalFrameEP8_jobject")),
    ("NewGlobalRef", Some("_ZN7_JNIEnv12NewGlobalRefEP8_jobject")),
    ("DeleteGlobalRef", Some("_ZN7_JNIEnv15DeleteGlobalRefEP8_jobject")),
    ("DeleteLocalRef", Some("_ZN7_JNIEnv14DeleteLocalRefEP8_jobject")),
    ("IsSameObject", Some("_ZN7_JNIEnv12IsSameObjectEP8_jobjectS1_")),
    ("NewLocalRef", Some("_ZN7_JNIEnv11NewLocalRefEP8_jobject")),
    ("EnsureLocalCapacity", Some("_ZN7_JNIEnv19EnsureLocalCapacityEi")),
    ("AllocObject", Some("_ZN7_JNIEnv11AllocObjectEP7_jclass")),
    ("NewObject", Some("_ZN7_JNIEnv9NewObjectEP7_jclassP10_jmethodIDz")),
    ("NewObjectV", Some("_ZN7_JNIEnv10NewObjectVEP7_jclassP10_jmethodIDPc")),
    ("NewObjectA", Some("_ZN7_JNIEnv10NewObjectAEP7_jclassP10_jmethodIDP6jvalue")),
    ("GetObjectClass", Some("_ZN7_JNIEnv14GetObjectClassEP8_jobject")),
    ("IsInstanceOf", Some("_ZN7_JNIEnv12IsInstanceOfEP8_jobjectP7_jclass")),
    ("GetMethodID", Some("_ZN7_JNIEnv11GetMethodIDEP7_jclassPKcS3_")),
    ("CallObjectMethod", Some("_ZN7_JNIEnv16CallObjectMethodEP8_jobjectP10_jmethodIDz")),
    ("CallObjectMethodV", Some("_ZN7_JNIEnv17CallObjectMethodVEP8_jobjectP10_jmethodIDPc")),
    ("CallObjectMethodA", Some("_ZN7_JNIEnv17CallObjectMethodAEP8_jobjectP10_jmethodIDP6jvalue")),
    ("CallBooleanMethod", Some("_ZN7_JNIEnv17CallBooleanMethodEP8_jobjectP10_jmethodIDz")),
    ("CallBooleanMethodV", Some("_ZN7_JNIEnv18CallBooleanMethodVEP8_jobjectP10_jmethodIDPc")),
    ("CallBooleanMethodA", Some("_ZN7_JNIEnv18CallBooleanMethodAEP8_jobjectP10_jmethodIDP6jvalue")),
    ("CallByteMethod", Some("_ZN7_JNIEnv14CallByteMethodEP8_jobjectP10_jmethodIDz")),
    ("CallByteMethodV", Some("_ZN7_JNIEnv15CallByteMethodVEP8_jobjectP10_jmethodIDPc")),
    ("CallByteMethodA", Some("_ZN7_JNIEnv15CallByteMethodAEP8_jobjectP10_jmethodIDP6jvalue")),
    ("CallCharMethod", Some("_ZN7_JNIEnv14CallCharMethodEP8_jobjectP10_jmethodIDz")),
    ("CallCharMethodV", Some("_ZN7_JNIEnv15CallCharMethodVEP8_jobjectP10_jmethodIDPc")),
    ("CallCharMethodA", Some("_ZN7_JNIEnv15CallCharMethodAEP8_jobjectP10_jmethodIDP6jvalue")),
    ("CallShortMethod", Some("_ZN7_JNIEnv15CallShortMethodEP8_jobjectP10_jmethodIDz")),
    ("CallShortMethodV", Some("_ZN7_JNIEnv16CallShortMethodVEP8_jobjectP10_jmethodIDPc")),
    ("CallShortMethodA", Some("_ZN7_JNIEnv16CallShortMethodAEP8_jobjectP10_jmethodIDP6jvalue")),
    ("CallIntMethod", Some("_ZN7_JNIEnv13CallIntMethodEP8_jobjectP10_jmethodIDz")),
    ("CallIntMethodV", Some("_ZN7_JNIEnv14CallIntMethodVEP8_jobjectP10_jmethodIDPc")),
    ("CallIntMethodA", Some("_ZN7_JNIEnv14CallIntMethodAEP8_jobjectP10_jmethodIDP6jvalue")),
    ("CallLongMethod", Some("_ZN7_JNIEnv14CallLongMethodEP8_jobjectP10_jmethodIDz")),
    ("CallLongMethodV", Some("_ZN7_JNIEnv15CallLongMethodVEP8_jobjectP10_jmethodIDPc")),
    ("CallLongMethodA", Some("_ZN7_JNIEnv15CallLongMethodAEP8_jobjectP10_jmethodIDP6jvalue")),
    ("CallFloatMethod", Some("_ZN7_JNIEnv15CallFloatMethodEP8_jobjectP10_jmethodIDz")),
    ("CallFloatMethodV", Some("_ZN7_JNIEnv16CallFloatMethodVEP8_jobjectP10_jmethodIDPc")),
    ("CallFloatMethodA", Some("_ZN7_JNIEnv16CallFloatMethodAEP8_jobjectP10_jmethodIDP6jvalue")),
    ("CallDoubleMethod", Some("_ZN7_JNIEnv16CallDoubleMethodEP8_jobjectP10_jmethodIDz")),
    ("CallDoubleMethodV", Some("_ZN7_JNIEnv17CallDoubleMethodVEP8_jobjectP10_jmethodIDPc")),
    ("CallDoubleMethodA", Some("_ZN7_JNIEnv17CallDoubleMethodAEP8_jobjectP10_jmethodIDP6jvalue")),
    ("CallVoidMethod", Some("_ZN7_JNIEnv14CallVoidMethodEP8_jobjectP10_jmethodIDz")),
    ("CallVoidMethodV", Some("_ZN7_JNIEnv15CallVoidMethodVEP8_jobjectP10_jmethodIDPc")),
    ("CallVoidMethodA", Some("_ZN7_JNIEnv15CallVoidMethodAEP8_jobjectP10_jmethodIDP6jvalue")),
    ("CallNonvirtualObjectMethod", Some("_ZN7_JNIEnv26CallNonvirtualObjectMethodEP8_jobjectP7_jclassP10_jmethodIDz")),
    ("CallNonvirtualObjectMethodV", Some("_ZN7_JNIEnv27CallNonvirtualObjectMethodVEP8_jobjectP7_jclassP10_jmethodIDPc")),
    ("CallNonvirtualObjectMethodA", Some("_ZN7_JNIEnv27CallNonvirtualObjectMethodAEP8_jobjectP7_jclassP10_jmethodIDP6jvalue")),
    ("CallNonvirtualBooleanMethod", Some("_ZN7_JNIEnv27CallNonvirtualBooleanMethodEP8_jobjectP7_jclassP10_jmethodIDz")),
    ("CallNonvirtualBooleanMethodV", Some("_ZN7_JNIEnv28CallNonvirtualBooleanMethodVEP8_jobjectP7_jclassP10_jmethodIDPc")),
    ("CallNonvirtualBooleanMethodA", Some("_ZN7_JNIEnv28CallNonvirtualBooleanMethodAEP8_jobjectP7_jclassP10_jmethodIDP6jvalue")),
    ("CallNonvirtualByteMethod", Some("_ZN7_JNIEnv24CallNonvirtualByteMethodEP8_jobjectP7_jclassP10_jmethodIDz")),
    ("CallNonvirtualByteMethodV", Some("_ZN7_JNIEnv25CallNonvirtualByteMethodVEP8_jobjectP7_jclassP10_jmethodIDPc")),
    ("CallNonvirtualByteMethodA", Some("_ZN7_JNIEnv25CallNonvirtualByteMethodAEP8_jobjectP7_jclassP10_jmethodIDP6jvalue")),
    ("CallNonvirtualCharMethod", Some("_ZN7_JNIEnv24CallNonvirtualCharMethodEP8_jobjectP7_jclassP10_jmethodIDz")),
    ("CallNonvirtualCharMethodV", Some("_ZN7_JNIEnv25CallNonvirtualCharMethodVEP8_jobjectP7_jclassP10_jmethodIDPc")),
    ("CallNonvirtualCharMethodA", Some("_ZN7_JNIEnv25CallNonvirtualCharMethodAEP8_jobjectP7_jclassP10_jmethodIDP6jvalue")),
    ("CallNonvirtualShortMethod", Some("_ZN7_JNIEnv25CallNonvirtualShortMethodEP8_jobjectP7_jclassP10_jmethodIDz")),
    ("CallNonvirtualShortMethodV", Some("_ZN7_JNIEnv26CallNonvirtualShortMethodVEP8_jobjectP7_jclassP10_jmethodIDPc")),
    ("CallNonvirtualShortMethodA", Some("_ZN7_JNIEnv26CallNonvirtualShortMethodAEP8_jobjectP7_jclassP10_jmethodIDP6jvalue")),
    ("CallNonvirtualIntMethod", Some("_ZN7_JNIEnv23CallNonvirtualIntMethodEP8_jobjectP7_jclassP10_jmethodIDz")),
    ("CallNonvirtualIntMethodV", Some("_ZN7_JNIEnv24CallNonvirtualIntMethodVEP8_jobjectP7_jclassP10_jmethodIDPc")),
    ("CallNonvirtualIntMethodA", Some("_ZN7_JNIEnv24CallNonvirtualIntMethodAEP8_jobjectP7_jclassP10_jmethodIDP6jvalue")),
    ("CallNonvirtualLongMethod", Some("_ZN7_JNIEnv24CallNonvirtualLongMethodEP8_jobjectP7_jclassP10_jmethodIDz")),
    ("CallNonvirtualLongMethodV", Some("_ZN7_JNIEnv25CallNonvirtualLongMethodVEP8_jobjectP7_jclassP10_jmethodIDPc")),
    ("CallNonvirtualLongMethodA", Some("_ZN7_JNIEnv25CallNonvirtualLongMethodAEP8_jobjectP7_jclassP10_jmethodIDP6jvalue")),
    ("CallNonvirtualFloatMethod", Some("_ZN7_JNIEnv25CallNonvirtualFloatMethodEP8_jobjectP7_jclassP10_jmethodIDz")),
    ("CallNonvirtualFloatMethodV", Some("_ZN7_JNIEnv26CallNonvirtualFloatMethodVEP8_jobjectP7_jclassP10_jmethodIDPc")),
    ("CallNonvirtualFloatMethodA", Some("_ZN7_JNIEnv26CallNonvirtualFloatMethodAEP8_jobjectP7_jclassP10_jmethodIDP6jvalue")),
    ("CallNonvirtualDoubleMethod", Some("_ZN7_JNIEnv26CallNonvirtualDoubleMethodEP8_jobjectP7_jclassP10_jmethodIDz")),
    ("CallNonvirtualDoubleMethodV", Some("_ZN7_JNIEnv27CallNonvirtualDoubleMethodVEP8_jobjectP7_jclassP10_jmethodIDPc")),
    ("CallNonvirtualDoubleMethodA", Some("_ZN7_JNIEnv27CallNonvirtualDoubleMethodAEP8_jobjectP7_jclassP10_jmethodIDP6jvalue")),
    ("CallNonvirtualVoidMethod", Some("_ZN7_JNIEnv24CallNonvirtualVoidMethodEP8_jobjectP7_jclassP10_jmethodIDz")),
    ("CallNonvirtualVoidMethodV", Some("_ZN7_JNIEnv25CallNonvirtualVoidMethodVEP8_jobjectP7_jclassP10_jmethodIDPc")),
    ("CallNonvirtualVoidMethodA", Some("_ZN7_JNIEnv25CallNonvirtualVoidMethodAEP8_jobjectP7_jclassP10_jmethodIDP6jvalue")),
    ("GetFieldID", Some("_ZN7_JNIEnv10GetFieldIDEP7_jclassPKcS3_")),
    ("GetObjectField", Some("_ZN7_JNIEnv14GetObjectFieldEP8_jobjectP9_jfieldID")),
    ("GetBooleanField", Some("_ZN7_JNIEnv15GetBooleanFieldEP8_jobjectP9_jfieldID")),
    ("GetByteField", Some("_ZN7_JNIEnv12GetByteFieldEP8_jobjectP9_jfieldID")),
    ("GetCharField", Some("_ZN7_JNIEnv12GetCharFieldEP8_jobjectP9_jfieldID")),
    ("GetShortField", Some("_ZN7_JNIEnv13GetShortFieldEP8_jobjectP9_jfieldID")),
    ("GetIntField", Some("_ZN7_JNIEnv11GetIntFieldEP8_jobjectP9_jfieldID")),
    ("GetLongField", Some("_ZN7_JNIEnv12GetLongFieldEP8_jobjectP9_jfieldID")),
    ("GetFloatField", Some("_ZN7_JNIEnv13GetFloatFieldEP8_jobjectP9_jfieldID")),
    ("GetDoubleField", Some("_ZN7_JNIEnv14GetDoubleFieldEP8_jobjectP9_jfieldID")),
    ("SetObjectField", Some("_ZN7_JNIEnv14SetObjectFieldEP8_jobjectP9_jfieldIDS1_")),
    ("SetBooleanField", Some("_ZN7_JNIEnv15SetBooleanFieldEP8_jobjectP9_jfieldIDh")),
    ("SetByteField", Some("_ZN7_JNIEnv12SetByteFieldEP8_jobjectP9_jfieldIDa")),
    ("SetCharField", Some("_ZN7_JNIEnv12SetCharFieldEP8_jobjectP9_jfieldIDt")),
    ("SetShortField", Some("_ZN7_JNIEnv13SetShortFieldEP8_jobjectP9_jfieldIDs")),
    ("SetIntField", Some("_ZN7_JNIEnv11SetIntFieldEP8_jobjectP9_jfieldIDi")),
    ("SetLongField", Some("_ZN7_JNIEnv12SetLongFieldEP8_jobjectP9_jfieldIDx")),
    ("SetFloatField", Some("_ZN7_JNIEnv13SetFloatFieldEP8_jobjectP9_jfieldIDf")),
    ("SetDoubleField", Some("_ZN7_JNIEnv14SetDoubleFieldEP8_jobjectP9_jfieldIDd")),
    ("GetStaticMethodID", Some("_ZN7_JNIEnv17GetStaticMethodIDEP7_jclassPKcS3_")),
    ("CallStaticObjectMethod", Some("_ZN7_JNIEnv22CallStaticObjectMethodEP7_jclassP10_jmethodIDz")),
    ("CallStaticObjectMethodV", Some("_ZN7_JNIEnv23CallStaticObjectMethodVEP7_jclassP10_jmethodIDPc")),
    ("CallStaticObjectMethodA", Some("_ZN7_JNIEnv23CallStaticObjectMethodAEP7_jclassP10_jmethodIDP6jvalue")),
    ("CallStaticBooleanMethod", Some("_ZN7_JNIEnv23CallStaticBooleanMethodEP7_jclassP10_jmethodIDz")),
    ("CallStaticBooleanMethodV", Some("_ZN7_JNIEnv24CallStaticBooleanMethodVEP7_jclassP10_jmethodIDPc")),
    ("CallStaticBooleanMethodA", Some("_ZN7_JNIEnv24CallStaticBooleanMethodAEP7_jclassP10_jmethodIDP6jvalue")),
    ("CallStaticByteMethod", Some("_ZN7_JNIEnv20CallStaticByteMethodEP7_jclassP10_jmethodIDz")),
    ("CallStaticByteMethodV", Some("_ZN7_JNIEnv21CallStaticByteMethodVEP7_jclassP10_jmethodIDPc")),
    ("CallStaticByteMethodA", Some("_ZN7_JNIEnv21CallStaticByteMethodAEP7_jclassP10_jmethodIDP6jvalue")),
    ("CallStaticCharMethod", Some("_ZN7_JNIEnv20CallStaticCharMethodEP7_jclassP10_jmethodIDz")),
    ("CallStaticCharMethodV", Some("_ZN7_JNIEnv21CallStaticCharMethodVEP7_jclassP10_jmethodIDPc")),
    ("CallStaticCharMethodA", Some("_ZN7_JNIEnv21CallStaticCharMethodAEP7_jclassP10_jmethodIDP6jvalue")),
    ("CallStaticShortMethod", Some("_ZN7_JNIEnv21CallStaticShortMethodEP7_jclassP10_jmethodIDz")),
    ("CallStaticShortMethodV", Some("_ZN7_JNIEnv22CallStaticShortMethodVEP7_jclassP10_jmethodIDPc")),
    ("CallStaticShortMethodA", Some("_ZN7_JNIEnv22CallStaticShortMethodAEP7_jclassP10_jmethodIDP6jvalue")),
    ("CallStaticIntMethod", Some("_ZN7_JNIEnv19CallStaticIntMethodEP7_jclassP10_jmethodIDz")),
    ("CallStaticIntMethodV", Some("_ZN7_JNIEnv20CallStaticIntMethodVEP7_jclassP10_jmethodIDPc")),
    ("CallStaticIntMethodA", Some("_ZN7_JNIEnv20CallStaticIntMethodAEP7_jclassP10_jmethodIDP6jvalue")),
    ("CallStaticLongMethod", Some("_ZN7_JNIEnv20CallStaticLongMethodEP7_jclassP10_jmethodIDz")),
    ("CallStaticLongMethodV", Some("_ZN7_JNIEnv21CallStaticLongMethodVEP7_jclassP10_jmethodIDPc")),
    ("CallStaticLongMethodA", Some("_ZN7_JNIEnv21CallStaticLongMethodAEP7_jclassP10_jmethodIDP6jvalue")),
    ("CallStaticFloatMethod", Some("_ZN7_JNIEnv21CallStaticFloatMethodEP7_jclassP10_jmethodIDz")),
    ("CallStaticFloatMethodV", Some("_ZN7_JNIEnv22CallStaticFloatMethodVEP7_jclassP10_jmethodIDPc")),
    ("CallStaticFloatMethodA", Some("_ZN7_JNIEnv22CallStaticFloatMethodAEP7_jclassP10_jmethodIDP6jvalue")),
    ("CallStaticDoubleMethod", Some("_ZN7_JNIEnv22CallStaticDoubleMethodEP7_jclassP10_jmethodIDz")),
    ("CallStaticDoubleMethodV", Some("_ZN7_JNIEnv23CallStaticDoubleMethodVEP7_jclassP10_jmethodIDPc")),
    ("CallStaticDoubleMethodA", Some("_ZN7_JNIEnv23CallStaticDoubleMethodAEP7_jclassP10_jmethodIDP6jvalue")),
    ("CallStaticVoidMethod", Some("_ZN7_JNIEnv20CallStaticVoidMethodEP7_jclassP10_jmethodIDz")),
    ("CallStaticVoidMethodV", Some("_ZN7_JNIEnv21CallStaticVoidMethodVEP7_jclassP10_jmethodIDPc")),
    ("CallStaticVoidMethodA", Some("_ZN7_JNIEnv21CallStaticVoidMethodAEP7_jclassP10_jmethodIDP6jvalue")),
    ("GetStaticFieldID", Some("_ZN7_JNIEnv16GetStaticFieldIDEP7_jclassPKcS3_")),
    ("GetStaticObjectField", Some("_ZN7_JNIEnv20GetStaticObjectFieldEP7_jclassP9_jfieldID")),
    ("GetStaticBooleanField", Some("_ZN7_JNIEnv21GetStaticBooleanFieldEP7_jclassP9_jfieldID")),
    ("GetStaticByteField", Some("_ZN7_JNIEnv18GetStaticByteFieldEP7_jclassP9_jfieldID")),
    ("GetStaticCharField", Some("_ZN7_JNIEnv18GetStaticCharFieldEP7_jclassP9_jfieldID")),
    ("GetStaticShortField", Some("_ZN7_JNIEnv19GetStaticShortFieldEP7_jclassP9_jfieldID")),
    ("GetStaticIntField", Some("_ZN7_JNIEnv17GetStaticIntFieldEP7_jclassP9_jfieldID")),
    ("GetStaticLongField", Some("_ZN7_JNIEnv18GetStaticLongFieldEP7_jclassP9_jfieldID")),
    ("GetStaticFloatField", Some("_ZN7_JNIEnv19GetStaticFloatFieldEP7_jclassP9_jfieldID")),
    ("GetStaticDoubleField", Some("_ZN7_JNIEnv20GetStaticDoubleFieldEP7_jclassP9_jfieldID")),
    ("SetStaticObjectField", Some("_ZN7_JNIEnv20SetStaticObjectFieldEP7_jclassP9_jfieldIDP8_jobject")),
    ("SetStaticBooleanField", Some("_ZN7_JNIEnv21SetStaticBooleanFieldEP7_jclassP9_jfieldIDh")),
    ("SetStaticByteField", Some("_ZN7_JNIEnv18SetStaticByteFieldEP7_jclassP9_jfieldIDa")),
    ("SetStaticCharField", Some("_ZN7_JNIEnv18SetStaticCharFieldEP7_jclassP9_jfieldIDt")),
    ("SetStaticShortField", Some("_ZN7_JNIEnv19SetStaticShortFieldEP7_jclassP9_jfieldIDs")),
    ("SetStaticIntField", Some("_ZN7_JNIEnv17SetStaticIntFieldEP7_jclassP9_jfieldIDi")),
    ("SetStaticLongField", Some("_ZN7_JNIEnv18SetStaticLongFieldEP7_jclassP9_jfieldIDx")),
    ("SetStaticFloatField", Some("_ZN7_JNIEnv19SetStaticFloatFieldEP7_jclassP9_jfieldIDf")),
    ("SetStaticDoubleField", Some("_ZN7_JNIEnv20SetStaticDoubleFieldEP7_jclassP9_jfieldIDd")),
    ("NewString", Some("_ZN7_JNIEnv9NewStringEPKti")),
    ("GetStringLength", Some("_ZN7_JNIEnv15GetStringLengthEP8_jstring")),
    ("GetStringChars", Some("_ZN7_JNIEnv14GetStringCharsEP8_jstringPh")),
    ("ReleaseStringChars", Some("_ZN7_JNIEnv18ReleaseStringCharsEP8_jstringPKt")),
    ("NewStringUTF", Some("_ZN7_JNIEnv12NewStringUTFEPKc")),
    ("GetStringUTFLength", Some("_ZN7_JNIEnv18GetStringUTFLengthEP8_jstring")),
    ("GetStringUTFChars", Some("_ZN7_JNIEnv17GetStringUTFCharsEP8_jstringPh")),
    ("ReleaseStringUTFChars", Some("_ZN7_JNIEnv21ReleaseStringUTFCharsEP8_jstringPKc")),
    ("GetArrayLength", Some("_ZN7_JNIEnv14GetArrayLengthEP7_jarray")),
    ("NewObjectArray", Some("_ZN7_JNIEnv14NewObjectArrayEiP7_jclassP8_jobject")),
    ("GetObjectArrayElement", Some("_ZN7_JNIEnv21GetObjectArrayElementEP13_jobjectArrayi")),
    ("SetObjectArrayElement", Some("_ZN7_JNIEnv21SetObjectArrayElementEP13_jobjectArrayiP8_jobject")),
    ("NewBooleanArray", Some("_ZN7_JNIEnv15NewBooleanArrayEi")),
    ("NewByteArray", Some("_ZN7_JNIEnv12NewByteArrayEi")),
    ("NewCharArray", Some("_ZN7_JNIEnv12NewCharArrayEi")),
    ("NewShortArray", Some("_ZN7_JNIEnv13NewShortArrayEi")),
    ("NewIntArray", Some("_ZN7_JNIEnv11NewIntArrayEi")),
    ("NewLongArray", Some("_ZN7_JNIEnv12NewLongArrayEi")),
    ("NewFloatArray", Some("_ZN7_JNIEnv13NewFloatArrayEi")),
    ("NewDoubleArray", Some("_ZN7_JNIEnv14NewDoubleArrayEi")),
    ("GetBooleanArrayElements", Some("_ZN7_JNIEnv23GetBooleanArrayElementsEP14_jbooleanArrayPh")),
    ("GetByteArrayElements", Some("_ZN7_JNIEnv20GetByteArrayElementsEP11_jbyteArrayPh")),
    ("GetCharArrayElements", Some("_ZN7_JNIEnv20GetCharArrayElementsEP11_jcharArrayPh")),
    ("GetShortArrayElements", Some("_ZN7_JNIEnv21GetShortArrayElementsEP12_jshortArrayPh")),
    ("GetIntArrayElements", Some("_ZN7_JNIEnv19GetIntArrayElementsEP10_jintArrayPh")),
    ("GetLongArrayElements", Some("_ZN7_JNIEnv20GetLongArrayElementsEP11_jlongArrayPh")),
    ("GetFloatArrayElements", Some("_ZN7_JNIEnv21GetFloatArrayElementsEP12_jfloatArrayPh")),
    ("GetDoubleArrayElements", Some("_ZN7_JNIEnv22GetDoubleArrayElementsEP13_jdoubleArrayPh")),
    ("ReleaseBooleanArrayElements", Some("_ZN7_JNIEnv27ReleaseBooleanArrayElementsEP14_jbooleanArrayPhi")),
    ("ReleaseByteArrayElements", Some("_ZN7_JNIEnv24ReleaseByteArrayElementsEP11_jbyteArrayPai")),
    ("ReleaseCharArrayElements", Some("_ZN7_JNIEnv24ReleaseCharArrayElementsEP11_jcharArrayPti")),
    ("ReleaseShortArrayElements", Some("_ZN7_JNIEnv25ReleaseShortArrayElementsEP12_jshortArrayPsi")),
    ("ReleaseIntArrayElements", Some("_ZN7_JNIEnv23ReleaseIntArrayElementsEP10_jintArrayPii")),
    ("ReleaseLongArrayElements", Some("_ZN7_JNIEnv24ReleaseLongArrayElementsEP11_jlongArrayPxi")),
    ("ReleaseFloatArrayElements", Some("_ZN7_JNIEnv25ReleaseFloatArrayElementsEP12_jfloatArrayPfi")),
    ("ReleaseDoubleArrayElements", Some("_ZN7_JNIEnv26ReleaseDoubleArrayElementsEP13_jdoubleArrayPdi")),
    ("GetBooleanArrayRegion", Some("_ZN7_JNIEnv21GetBooleanArrayRegionEP14_jbooleanArrayiiPh")),
    ("GetByteArrayRegion", Some("_ZN7_JNIEnv18GetByteArrayRegionEP11_jbyteArrayiiPa")),
    ("GetCharArrayRegion", Some("_ZN7_JNIEnv18GetCharArrayRegionEP11_jcharArrayiiPt")),
    ("GetShortArrayRegion", Some("_ZN7_JNIEnv19GetShortArrayRegionEP12_jshortArrayiiPs")),
    ("GetIntArrayRegion", Some("_ZN7_JNIEnv17GetIntArrayRegionEP10_jintArrayiiPi")),
    ("GetLongArrayRegion", Some("_ZN7_JNIEnv18GetLongArrayRegionEP11_jlongArrayiiPx")),
    ("GetFloatArrayRegion", Some("_ZN7_JNIEnv19GetFloatArrayRegionEP12_jfloatArrayiiPf")),
    ("GetDoubleArrayRegion", Some("_ZN7_JNIEnv20GetDoubleArrayRegionEP13_jdoubleArrayiiPd")),
    ("SetBooleanArrayRegion", Some("_ZN7_JNIEnv21SetBooleanArrayRegionEP14_jbooleanArrayiiPKh")),
    ("SetByteArrayRegion", Some("_ZN7_JNIEnv18SetByteArrayRegionEP11_jbyteArrayiiPKa")),
    ("SetCharArrayRegion", Some("_ZN7_JNIEnv18SetCharArrayRegionEP11_jcharArrayiiPKt")),
    ("SetShortArrayRegion", Some("_ZN7_JNIEnv19SetShortArrayRegionEP12_jshortArrayiiPKs")),
    ("SetIntArrayRegion", Some("_ZN7_JNIEnv17SetIntArrayRegionEP10_jintArrayiiPKi")),
    ("SetLongArrayRegion", Some("_ZN7_JNIEnv18SetLongArrayRegionEP11_jlongArrayiiPKx")),
    ("SetFloatArrayRegion", Some("_ZN7_JNIEnv19SetFloatArrayRegionEP12_jfloatArrayiiPKf")),
    ("SetDoubleArrayRegion", Some("_ZN7_JNIEnv20SetDoubleArrayRegionEP13_jdoubleArrayiiPKd")),
    ("RegisterNatives", Some("_ZN7_JNIEnv15RegisterNativesEP7_jclassPK15JNINativeMethodi")),
    ("UnregisterNatives", Some("_ZN7_JNIEnv17UnregisterNativesEP7_jclass")),
    ("MonitorEnter", Some("_ZN7_JNIEnv12MonitorEnterEP8_jobject")),
    ("MonitorExit", Some("_ZN7_JNIEnv11MonitorExitEP8_jobject")),
    ("GetJavaVM", Some("_ZN7_JNIEnv9GetJavaVMEPP7_JavaVM")),
    ("GetStringRegion", Some("_ZN7_JNIEnv15GetStringRegionEP8_jstringiiPt")),
    ("GetStringUTFRegion", Some("_ZN7_JNIEnv18GetStringUTFRegionEP8_jstringiiPc")),
    ("GetPrimitiveArrayCritical", Some("_ZN7_JNIEnv25GetPrimitiveArrayCriticalEP7_jarrayPh")),
    ("ReleasePrimitiveArrayCritical", Some("_ZN7_JNIEnv29ReleasePrimitiveArrayCriticalEP7_jarrayPvi")),
    ("GetStringCritical", Some("_ZN7_JNIEnv17GetStringCriticalEP8_jstringPh")),
    ("ReleaseStringCritical", Some("_ZN7_JNIEnv21ReleaseStringCriticalEP8_jstringPKt")),
    ("NewWeakGlobalRef", Some("_ZN7_JNIEnv16NewWeakGlobalRefEP8_jobject")),
    ("DeleteWeakGlobalRef", Some("_ZN7_JNIEnv19DeleteWeakGlobalRefEP8_jobject")),
    ("ExceptionCheck", Some("_ZN7_JNIEnv14ExceptionCheckEv")),
    ("NewDirectByteBuffer", Some("_ZN7_JNIEnv19NewDirectByteBufferEPvx")),
    ("GetDirectBufferAddress", Some("_ZN7_JNIEnv22GetDirectBufferAddressEP8_jobject")),
    ("GetDirectBufferCapacity", Some("_ZN7_JNIEnv23GetDirectBufferCapacityEP8_jobject")),
    ("GetObjectRefType", Some("_ZN7_JNIEnv16GetObjectRefTypeEP8_jobject")),
];
